//! Abstract syntax of the language.
//!
//! The grammar in [`crate::parser`] produces an [`Expr`]; the checker in
//! [`crate::types`] and the evaluator in [`crate::interpreter`] both walk the
//! same tree without modifying it.

pub mod expression;

pub use expression::{Expr, Literal, Op};
