//! # stlc
//!
//! An interpreter for the simply typed lambda calculus with integers,
//! booleans, a handful of binary operators and `if`.
//!
//! ## Pipeline
//!
//! ```text
//! Source text
//!     ↓
//! [Parser]      → Expr           (parser)
//!     ↓
//! [Checker]     → Type           (types)
//!     ↓
//! [Interpreter] → Value          (interpreter)
//!     ↓
//! [Formatter]   → "value : type" (fmt)
//! ```
//!
//! Each stage stops the pipeline with its own error type; [`Error`] wraps
//! them and renders exactly the message of the stage that failed.
//!
//! ## Example
//!
//! ```
//! assert_eq!(stlc::run("(\\x : Int . x + 1) 41"), "42 : Int");
//! assert_eq!(stlc::run("y"), "Variable not in scope: y");
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - combinators, operator precedence and the grammar
//! - [`ast`] - expression tree
//! - [`types`] - types and the checker
//! - [`interpreter`] - values, scopes and evaluation
//! - [`fmt`] - result line and expression printer
//! - [`session`] - worker thread used by the command line front ends

pub mod ast;
pub mod fmt;
pub mod interpreter;
pub mod parser;
pub mod session;
pub mod types;

use thiserror::Error;
use tracing::debug;

use interpreter::{RuntimeError, Value};
use parser::ParseError;
use types::{Type, TypeError};

/// Failure of one of the pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Parse, check and evaluate `source`.
pub fn interpret(source: &str) -> Result<(Value, Type), Error> {
    let expr = parser::parse(source)?;
    let ty = types::check_closed(&expr)?;
    let value = interpreter::eval_closed(&expr)?;
    debug!(%value, %ty, "evaluated");
    Ok((value, ty))
}

/// Interpret `source` and render the outcome as a single line: either
/// `value : type` or the message of the first error.
pub fn run(source: &str) -> String {
    match interpret(source) {
        Ok((value, ty)) => fmt::render_result(&value, &ty),
        Err(err) => err.to_string(),
    }
}
