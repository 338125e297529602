//! Grammar of the language, assembled from the combinators.
//!
//! - `literal`: booleans, integers and identifiers
//! - `types`: type annotations
//! - `expression`: operators, application, `if` and lambdas
//!
//! Every rule consumes the whitespace that follows it.

mod expression;
mod literal;
mod types;

pub use expression::expression;
pub use types::type_expr;

use super::combinators::symbol;
use super::precedence::{Assoc, Combine, Operator};

/// An infix operator spelled `text` that builds its node with `combine`.
fn operator<T: 'static>(text: &'static str, combine: Combine<T>, assoc: Assoc) -> Operator<T> {
    Operator::infix(symbol(text).spaced() >> move |_| combine.clone(), assoc)
}
