//! # Parsing
//!
//! The parser works directly on the source text; there is no separate lexer.
//! It is layered the same way the grammar is built:
//!
//! - [`state`]: the input cursor and the Good/Bad outcome of a parse step
//! - [`combinators`]: primitive parsers and the ways to combine them
//! - [`precedence`]: binary operator chains from a table of levels
//! - `grammar`: the rules of the language itself
//!
//! A failed parse reports every dead end that was reached at the point of
//! failure, each with its row and column.

pub mod combinators;
pub mod precedence;
pub mod state;

mod grammar;

use thiserror::Error;
use tracing::debug;

use crate::ast::Expr;
use crate::types::Type;

use combinators::{run, spaces, BoxedParser};

pub use state::{DeadEnd, Position, Problem};

/// All dead ends of a failed parse, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_lines(.dead_ends))]
pub struct ParseError {
    pub dead_ends: Vec<DeadEnd>,
}

fn join_lines(dead_ends: &[DeadEnd]) -> String {
    dead_ends
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_all<T: 'static>(parser: BoxedParser<T>, source: &str) -> Result<T, ParseError> {
    run(spaces() * parser, source).map_err(|dead_ends| ParseError { dead_ends })
}

/// Parse a complete expression. Surrounding whitespace is ignored.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let expr = parse_all(grammar::expression(), source)?;
    debug!(%expr, "parsed expression");
    Ok(expr)
}

/// Parse a complete type annotation such as `(Int -> Bool) -> Int`.
pub fn parse_type(source: &str) -> Result<Type, ParseError> {
    parse_all(grammar::type_expr(), source)
}
