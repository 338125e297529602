//! Table-driven operator precedence.
//!
//! [`build_expression_parser`] turns a list of precedence levels plus a parser
//! for atoms into a parser for whole expressions. Levels are listed from the
//! loosest binding to the tightest. Each level is built on top of the level
//! that binds tighter than it, which serves as that level's term.
//!
//! Within one level an operator is left, right or non associative. Chains that
//! mix associativities, and chains of non associative operators, are rejected
//! with an "ambiguous use" problem at the offending operator instead of being
//! grouped arbitrarily.

use std::rc::Rc;

use tracing::trace;

use super::combinators::{one_of, BoxedParser};
use super::state::{good, ParseState, Parser, Problem, Step};

/// Builds a node from the two operands of a binary operator.
pub type Combine<T> = Rc<dyn Fn(T, T) -> T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    None,
    Left,
    Right,
}

impl Assoc {
    fn describe(self) -> &'static str {
        match self {
            Assoc::None => "non",
            Assoc::Left => "left",
            Assoc::Right => "right",
        }
    }
}

/// A binary operator: a parser that recognises it and yields the node builder.
pub struct Operator<T> {
    pub parser: BoxedParser<Combine<T>>,
    pub assoc: Assoc,
}

impl<T: 'static> Operator<T> {
    pub fn infix(parser: BoxedParser<Combine<T>>, assoc: Assoc) -> Self {
        Self { parser, assoc }
    }
}

/// Fold the precedence table into a single parser, tightest level innermost.
pub fn build_expression_parser<T: 'static>(
    levels: Vec<Vec<Operator<T>>>,
    term: BoxedParser<T>,
) -> BoxedParser<T> {
    levels
        .into_iter()
        .rev()
        .fold(term, |term, operators| Level::new(operators, term).into_parser())
}

struct Level<T> {
    term: BoxedParser<T>,
    left: BoxedParser<Combine<T>>,
    right: BoxedParser<Combine<T>>,
    non: BoxedParser<Combine<T>>,
}

impl<T: 'static> Level<T> {
    fn new(operators: Vec<Operator<T>>, term: BoxedParser<T>) -> Self {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut non = Vec::new();
        for Operator { parser, assoc } in operators {
            match assoc {
                Assoc::Left => left.push(parser),
                Assoc::Right => right.push(parser),
                Assoc::None => non.push(parser),
            }
        }
        Self {
            term,
            left: one_of(left),
            right: one_of(right),
            non: one_of(non),
        }
    }

    fn into_parser(self) -> BoxedParser<T> {
        let level = Rc::new(self);
        BoxedParser::new(move |state: &mut ParseState| level.parse(state))
    }

    fn operators(&self, assoc: Assoc) -> &BoxedParser<Combine<T>> {
        match assoc {
            Assoc::Left => &self.left,
            Assoc::Right => &self.right,
            Assoc::None => &self.non,
        }
    }

    /// Lookahead: does an operator of this class start here? Consumes nothing.
    fn sees(&self, assoc: Assoc, state: &mut ParseState) -> bool {
        let pos = state.position();
        let found = matches!(self.operators(assoc).parse(state), Step::Good { .. });
        state.restore(pos);
        found
    }

    /// Fails if an operator of one of the given classes follows.
    fn reject_ambiguous(&self, classes: &[Assoc], state: &mut ParseState) -> Option<Step<T>> {
        let assoc = classes.iter().copied().find(|&a| self.sees(a, state))?;
        trace!(row = state.position().row, col = state.position().col, "ambiguous operator");
        let problem = Problem::Custom(format!(
            "ambiguous use of a {} associative operator",
            assoc.describe()
        ));
        Some(Step::Bad {
            progress: true,
            problems: vec![state.dead_end(problem)],
        })
    }

    fn parse(&self, state: &mut ParseState) -> Step<T> {
        let mut progress = false;
        let first = good!(self.term.parse(state), progress);
        let step = if self.sees(Assoc::Right, state) {
            self.parse_right(first, state)
        } else if self.sees(Assoc::Left, state) {
            self.parse_left(first, state)
        } else if self.sees(Assoc::None, state) {
            self.parse_non(first, state)
        } else {
            return Step::Good {
                progress,
                value: first,
            };
        };
        step.after(progress)
    }

    /// `lhs (op term)*`, folded to the left.
    fn parse_left(&self, lhs: T, state: &mut ParseState) -> Step<T> {
        let mut progress = false;
        let mut acc = lhs;
        loop {
            let pos = state.position();
            match self.left.parse(state) {
                Step::Good {
                    progress: consumed,
                    value: combine,
                } => {
                    progress |= consumed;
                    let rhs = good!(self.term.parse(state), progress);
                    acc = combine(acc, rhs);
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
        if let Some(bad) = self.reject_ambiguous(&[Assoc::Right, Assoc::None], state) {
            return bad;
        }
        Step::Good {
            progress,
            value: acc,
        }
    }

    /// `lhs op (term op (term op ...))`, grouped to the right.
    fn parse_right(&self, lhs: T, state: &mut ParseState) -> Step<T> {
        let mut progress = false;
        let combine = good!(self.right.parse(state), progress);
        let operand = good!(self.term.parse(state), progress);
        let rhs = if self.sees(Assoc::Right, state) {
            good!(self.parse_right(operand, state), progress)
        } else {
            if let Some(bad) = self.reject_ambiguous(&[Assoc::Left, Assoc::None], state) {
                return bad;
            }
            operand
        };
        Step::Good {
            progress,
            value: combine(lhs, rhs),
        }
    }

    /// `lhs op term`, with nothing of this level allowed to follow.
    fn parse_non(&self, lhs: T, state: &mut ParseState) -> Step<T> {
        let mut progress = false;
        let combine = good!(self.non.parse(state), progress);
        let rhs = good!(self.term.parse(state), progress);
        if let Some(bad) =
            self.reject_ambiguous(&[Assoc::Right, Assoc::Left, Assoc::None], state)
        {
            return bad;
        }
        Step::Good {
            progress,
            value: combine(lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::combinators::{int, run, symbol};

    #[derive(Debug, Clone, PartialEq)]
    enum Tree {
        Leaf(i64),
        Node(&'static str, Box<Tree>, Box<Tree>),
    }

    fn op(text: &'static str, assoc: Assoc) -> Operator<Tree> {
        let combine: Combine<Tree> =
            Rc::new(move |l: Tree, r: Tree| Tree::Node(text, Box::new(l), Box::new(r)));
        Operator::infix(symbol(text).spaced() >> move |_| combine.clone(), assoc)
    }

    fn leaf(n: i64) -> Tree {
        Tree::Leaf(n)
    }

    fn node(text: &'static str, l: Tree, r: Tree) -> Tree {
        Tree::Node(text, Box::new(l), Box::new(r))
    }

    fn calculator() -> BoxedParser<Tree> {
        build_expression_parser(
            vec![
                vec![op("^", Assoc::Right)],
                vec![op("<", Assoc::None), op(">", Assoc::None)],
                vec![op("+", Assoc::Left), op("-", Assoc::Left)],
                vec![op("*", Assoc::Left)],
            ],
            int().spaced() >> Tree::Leaf,
        )
    }

    #[test]
    fn test_tighter_levels_bind_first() {
        assert_eq!(
            run(calculator(), "1 + 2 * 3"),
            Ok(node("+", leaf(1), node("*", leaf(2), leaf(3))))
        );
    }

    #[test]
    fn test_left_associative_chain() {
        assert_eq!(
            run(calculator(), "1 - 2 + 3"),
            Ok(node("+", node("-", leaf(1), leaf(2)), leaf(3)))
        );
    }

    #[test]
    fn test_right_associative_chain() {
        assert_eq!(
            run(calculator(), "1 ^ 2 ^ 3"),
            Ok(node("^", leaf(1), node("^", leaf(2), leaf(3))))
        );
    }

    #[test]
    fn test_non_associative_single_use() {
        assert_eq!(
            run(calculator(), "1 < 2 + 3"),
            Ok(node("<", leaf(1), node("+", leaf(2), leaf(3))))
        );
    }

    #[test]
    fn test_non_associative_chain_is_ambiguous() {
        let errors = run(calculator(), "1 < 2 > 3").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].problem,
            Problem::Custom("ambiguous use of a non associative operator".into())
        );
        assert_eq!((errors[0].row, errors[0].col), (1, 7));
    }

    #[test]
    fn test_mixed_associativity_is_ambiguous() {
        let mixed = || {
            build_expression_parser(
                vec![vec![op("&", Assoc::Right), op("|", Assoc::Left)]],
                int().spaced() >> Tree::Leaf,
            )
        };
        let errors = run(mixed(), "1 | 2 & 3").unwrap_err();
        assert_eq!(
            errors[0].problem,
            Problem::Custom("ambiguous use of a right associative operator".into())
        );
        let errors = run(mixed(), "1 & 2 | 3").unwrap_err();
        assert_eq!(
            errors[0].problem,
            Problem::Custom("ambiguous use of a left associative operator".into())
        );
    }

    #[test]
    fn test_missing_operand_is_committed() {
        let errors = run(calculator(), "1 +").unwrap_err();
        assert_eq!(errors[0].problem, Problem::ExpectingInt);
        assert_eq!(errors[0].col, 4);
    }
}
