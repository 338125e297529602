//! # Type checking
//!
//! Every lambda parameter carries an explicit annotation, so checking is a
//! single bottom-up pass: each expression is given its type from the types of
//! its children and the [`TypeEnv`] of the enclosing lambdas. The first
//! failure anywhere in the tree aborts the check.

pub mod check;
pub mod env;
pub mod error;
pub mod ty;

pub use check::{check, check_closed};
pub use env::TypeEnv;
pub use error::TypeError;
pub use ty::Type;
