use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use super::state::{good, DeadEnd, ParseState, Parser, Problem, Step};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> Step<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> Step<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let mut progress = false;
            let a = good!(self.parse(state), progress);
            let b = good!(other.parse(state), progress);
            Step::Good {
                progress,
                value: (a, b),
            }
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let mut progress = false;
            let a = good!(self.parse(state), progress);
            good!(other.parse(state), progress);
            Step::Good { progress, value: a }
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let mut progress = false;
            good!(self.parse(state), progress);
            other.parse(state).after(progress)
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| self.parse(state).map(&f))
    }

    /// Continue with a parser chosen from the result of this one
    pub fn and_then<U: 'static, F: Fn(T) -> BoxedParser<U> + 'static>(
        self,
        f: F,
    ) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let mut progress = false;
            let a = good!(self.parse(state), progress);
            f(a).parse(state).after(progress)
        })
    }

    /// Choice: try self, if it fails without consuming input try other
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        one_of(vec![self, other])
    }

    /// Report failures as if no input had been consumed
    pub fn backtrackable(self) -> BoxedParser<T> {
        backtrackable(self)
    }

    /// Parse self followed by any amount of whitespace
    pub fn spaced(self) -> BoxedParser<T> {
        self.skip(spaces())
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Control ===

/// Always succeeds with `value` without consuming input
pub fn succeed<T: Clone + 'static>(value: T) -> BoxedParser<T> {
    BoxedParser::new(move |_: &mut ParseState| Step::Good {
        progress: false,
        value: value.clone(),
    })
}

/// Always fails with a custom problem
pub fn problem<T: 'static>(message: impl Into<String>) -> BoxedParser<T> {
    let message = message.into();
    BoxedParser::new(move |state: &mut ParseState| state.fail(Problem::Custom(message.clone())))
}

/// Try each parser in order.
///
/// Commits to the first success, or to the first failure that consumed input.
/// When every alternative fails without progress, all their problems are kept.
pub fn one_of<T: 'static>(parsers: Vec<BoxedParser<T>>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position();
        let mut problems: Vec<DeadEnd> = Vec::new();
        for parser in &parsers {
            match parser.parse(state) {
                Step::Bad {
                    progress: false,
                    problems: more,
                } => {
                    state.restore(start);
                    problems.extend(more);
                }
                step => return step,
            }
        }
        Step::Bad {
            progress: false,
            problems,
        }
    })
}

/// Run `parser` but report its outcome as having made no progress, so an
/// enclosing `one_of` may still try the remaining alternatives.
pub fn backtrackable<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| match parser.parse(state) {
        Step::Good { value, .. } => Step::Good {
            progress: false,
            value,
        },
        Step::Bad { problems, .. } => Step::Bad {
            progress: false,
            problems,
        },
    })
}

/// Defer construction of a parser until it is run. Breaks the cycles between
/// mutually recursive grammar rules.
pub fn lazy<T: 'static, F: Fn() -> BoxedParser<T> + 'static>(thunk: F) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| thunk().parse(state))
}

// === Primitive Parsers ===

fn token(text: &'static str, expecting: Problem, keyword: bool) -> BoxedParser<()> {
    BoxedParser::new(move |state: &mut ParseState| {
        let rest = state.rest();
        if !rest.starts_with(text) {
            return state.fail(expecting.clone());
        }
        if keyword
            && rest[text.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return state.fail(expecting.clone());
        }
        state.advance_by(text.chars().count());
        Step::Good {
            progress: !text.is_empty(),
            value: (),
        }
    })
}

/// Match an exact piece of punctuation
pub fn symbol(text: &'static str) -> BoxedParser<()> {
    token(text, Problem::ExpectingSymbol(text.to_string()), false)
}

/// Match a word that must not run on into an identifier (`if` but not `iffy`)
pub fn keyword(text: &'static str) -> BoxedParser<()> {
    token(text, Problem::ExpectingKeyword(text.to_string()), true)
}

/// Consume characters while `predicate` holds
pub fn chomp_while<F: Fn(char) -> bool + 'static>(predicate: F) -> BoxedParser<()> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position().offset;
        while state.peek().is_some_and(&predicate) {
            state.advance();
        }
        Step::Good {
            progress: state.position().offset > start,
            value: (),
        }
    })
}

pub fn spaces() -> BoxedParser<()> {
    chomp_while(|c| matches!(c, ' ' | '\n' | '\r'))
}

/// Succeeds only when all input has been consumed
pub fn end() -> BoxedParser<()> {
    BoxedParser::new(|state: &mut ParseState| {
        if state.has_next() {
            state.fail(Problem::ExpectingEnd)
        } else {
            Step::Good {
                progress: false,
                value: (),
            }
        }
    })
}

/// Lexical rules for identifiers
#[derive(Debug, Clone, Copy)]
pub struct VariableRules {
    pub start: fn(char) -> bool,
    pub inner: fn(char) -> bool,
    pub reserved: &'static [&'static str],
}

pub fn variable(rules: VariableRules) -> BoxedParser<String> {
    BoxedParser::new(move |state: &mut ParseState| {
        if !state.peek().is_some_and(rules.start) {
            return state.fail(Problem::ExpectingVariable);
        }
        let start = state.position();
        state.advance();
        while state.peek().is_some_and(rules.inner) {
            state.advance();
        }
        let end = state.position();
        state.restore(start);
        let name = state.rest()[..end.offset - start.offset].to_string();
        if rules.reserved.contains(&name.as_str()) {
            return state.fail(Problem::ExpectingVariable);
        }
        state.restore(end);
        Step::Good {
            progress: true,
            value: name,
        }
    })
}

/// Decimal integer literal.
///
/// A leading `0` is a literal on its own. Base prefixes, fractions and
/// exponents are rejected after consuming input.
pub fn int() -> BoxedParser<i64> {
    BoxedParser::new(|state: &mut ParseState| {
        let rest = state.rest().as_bytes();
        let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return state.fail(Problem::ExpectingInt);
        }
        let len = if rest[0] == b'0' { 1 } else { digits };
        let invalid = match rest.get(len) {
            Some(b'x' | b'o' | b'b') => len == 1 && rest[0] == b'0',
            Some(b'.' | b'e' | b'E') => true,
            _ => false,
        };
        let parsed = state.rest()[..len].parse::<i64>();
        match parsed {
            Ok(value) if !invalid => {
                state.advance_by(len);
                Step::Good {
                    progress: true,
                    value,
                }
            }
            _ => Step::Bad {
                progress: true,
                problems: vec![state.dead_end(Problem::ExpectingInt)],
            },
        }
    })
}

// === Repetition ===

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut progress = false;
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Step::Good {
                    progress: consumed,
                    value,
                } => {
                    progress |= consumed;
                    results.push(value);
                }
                Step::Bad {
                    progress: true,
                    problems,
                } => {
                    return Step::Bad {
                        progress: true,
                        problems,
                    }
                }
                Step::Bad { .. } => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Step::Good {
            progress,
            value: results,
        }
    })
}

/// Parse one or more occurrences
pub fn some<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<(T, Vec<T>)> {
    parser.clone() + many(parser)
}

/// open p close, with whitespace allowed inside and after the brackets
pub fn between<T: 'static>(
    open: &'static str,
    close: &'static str,
    parser: BoxedParser<T>,
) -> BoxedParser<T> {
    symbol(open).spaced() * parser.spaced() - symbol(close).spaced()
}

pub fn parens<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    between("(", ")", parser)
}

/// Run `parser` over the whole of `source`
pub fn run<T: 'static>(parser: BoxedParser<T>, source: &str) -> Result<T, Vec<DeadEnd>> {
    let mut state = ParseState::new(source);
    (parser - end()).parse(&mut state).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word() -> BoxedParser<String> {
        variable(VariableRules {
            start: |c| c.is_ascii_lowercase(),
            inner: |c| c.is_ascii_alphanumeric(),
            reserved: &["if"],
        })
    }

    #[test]
    fn test_symbol_and_end() {
        assert_eq!(run(symbol("->"), "->"), Ok(()));
        let errors = run(symbol("->"), "=>").unwrap_err();
        assert_eq!(errors[0].problem, Problem::ExpectingSymbol("->".into()));
    }

    #[test]
    fn test_keyword_rejects_identifier_continuation() {
        assert!(run(keyword("if"), "if").is_ok());
        let errors = run(keyword("if"), "iffy").unwrap_err();
        assert_eq!(errors[0].problem, Problem::ExpectingKeyword("if".into()));
    }

    #[test]
    fn test_variable_rejects_reserved_words() {
        assert_eq!(run(word(), "abc1"), Ok("abc1".to_string()));
        assert!(run(word(), "if").is_err());
        assert!(run(word(), "Abc").is_err());
    }

    #[test]
    fn test_int() {
        assert_eq!(run(int(), "1234"), Ok(1234));
        assert_eq!(run(int(), "0"), Ok(0));
        assert!(run(int(), "0x1f").is_err());
        assert!(run(int(), "1.5").is_err());
        assert!(run(int(), "99999999999999999999").is_err());
    }

    #[test]
    fn test_one_of_commits_after_progress() {
        let arrow = symbol("-") * symbol(">") >> |_| "arrow";
        let minus = symbol("-") >> |_| "minus";
        let parser = one_of(vec![arrow.clone(), minus.clone()]);
        // the arrow alternative consumed '-' before failing
        assert!(run(parser, "-").is_err());

        let parser = one_of(vec![arrow.backtrackable(), minus]);
        assert_eq!(run(parser, "-"), Ok("minus"));
    }

    #[test]
    fn test_one_of_collects_problems() {
        let parser = one_of(vec![symbol("a"), symbol("b")]);
        let errors = run(parser, "c").unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_many_and_some() {
        let items = many(word().spaced());
        assert_eq!(
            run(items, "a b c"),
            Ok(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert!(run(some(word()), "").is_err());
    }

    #[test]
    fn test_parens_allow_whitespace() {
        assert_eq!(run(parens(int()), "( 7 ) "), Ok(7));
    }

    #[test]
    fn test_problem_position() {
        let parser = symbol("a").spaced() * problem::<()>("nope");
        let errors = run(parser, "a\n  x").unwrap_err();
        assert_eq!((errors[0].row, errors[0].col), (2, 3));
    }
}
