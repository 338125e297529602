use std::rc::Rc;

use thiserror::Error;

/// A location in the source text. Rows and columns start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub fn start() -> Self {
        Self {
            offset: 0,
            row: 1,
            col: 1,
        }
    }
}

/// The kind of expectation a parser failed to meet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("I expected the following string: `{0}`")]
    Expecting(String),
    #[error("I expected an integer")]
    ExpectingInt,
    #[error("I expected an hexadecimal string")]
    ExpectingHex,
    #[error("I expected an octal string")]
    ExpectingOctal,
    #[error("I expected a binary string")]
    ExpectingBinary,
    #[error("I expected a float")]
    ExpectingFloat,
    #[error("I expected a number")]
    ExpectingNumber,
    #[error("I expected a variable name")]
    ExpectingVariable,
    #[error("I expected the following symbol: `{0}`")]
    ExpectingSymbol(String),
    #[error("I expected the following keyword: `{0}`")]
    ExpectingKeyword(String),
    #[error("I reached an unexpected end of input")]
    ExpectingEnd,
    #[error("I reached an unexpected character")]
    UnexpectedChar,
    #[error("I encountered the following problem: {0}")]
    Custom(String),
    #[error("This is a bad repeat")]
    BadRepeat,
}

/// A failed expectation together with where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{problem} ({row}:{col}).")]
pub struct DeadEnd {
    pub row: u32,
    pub col: u32,
    pub problem: Problem,
}

/// Outcome of a single parse step.
///
/// `progress` records whether input was consumed. Alternation only moves on to
/// the next candidate when a failure made no progress.
#[derive(Debug)]
pub enum Step<T> {
    Good { progress: bool, value: T },
    Bad { progress: bool, problems: Vec<DeadEnd> },
}

impl<T> Step<T> {
    pub fn progress(&self) -> bool {
        match self {
            Step::Good { progress, .. } | Step::Bad { progress, .. } => *progress,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U> {
        match self {
            Step::Good { progress, value } => Step::Good {
                progress,
                value: f(value),
            },
            Step::Bad { progress, problems } => Step::Bad { progress, problems },
        }
    }

    /// Fold the progress of earlier steps of the same parse into this one.
    pub fn after(self, earlier: bool) -> Step<T> {
        match self {
            Step::Good { progress, value } => Step::Good {
                progress: earlier || progress,
                value,
            },
            Step::Bad { progress, problems } => Step::Bad {
                progress: earlier || progress,
                problems,
            },
        }
    }

    pub fn into_result(self) -> Result<T, Vec<DeadEnd>> {
        match self {
            Step::Good { value, .. } => Ok(value),
            Step::Bad { problems, .. } => Err(problems),
        }
    }
}

/// Unwraps a `Good` step, accumulating its progress into `$progress`, or
/// returns the `Bad` step from the enclosing parser.
macro_rules! good {
    ($step:expr, $progress:ident) => {
        match $step {
            $crate::parser::state::Step::Good { progress, value } => {
                $progress |= progress;
                value
            }
            $crate::parser::state::Step::Bad { progress, problems } => {
                return $crate::parser::state::Step::Bad {
                    progress: $progress || progress,
                    problems,
                };
            }
        }
    };
}

pub(crate) use good;

/// Cursor over the raw source text.
#[derive(Debug, Clone)]
pub struct ParseState {
    source: Rc<str>,
    position: Position,
}

impl ParseState {
    pub fn new(source: &str) -> Self {
        Self {
            source: Rc::from(source),
            position: Position::start(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn restore(&mut self, position: Position) {
        self.position = position;
    }

    /// The input that has not been consumed yet.
    pub fn rest(&self) -> &str {
        &self.source[self.position.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn has_next(&self) -> bool {
        self.position.offset < self.source.len()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position.offset += c.len_utf8();
        if c == '\n' {
            self.position.row += 1;
            self.position.col = 1;
        } else {
            self.position.col += 1;
        }
        Some(c)
    }

    /// Consume `count` characters.
    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
    }

    pub fn dead_end(&self, problem: Problem) -> DeadEnd {
        DeadEnd {
            row: self.position.row,
            col: self.position.col,
            problem,
        }
    }

    pub fn fail<T>(&self, problem: Problem) -> Step<T> {
        Step::Bad {
            progress: false,
            problems: vec![self.dead_end(problem)],
        }
    }
}

pub trait Parser<T> {
    fn parse(&self, state: &mut ParseState) -> Step<T>;
}

impl<T, F: Fn(&mut ParseState) -> Step<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> Step<T> {
        self(state)
    }
}
