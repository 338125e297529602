//! Tree-walking evaluator.
//!
//! Lambdas evaluate to closures that capture the [`Scope`] they were created
//! in; applying a closure binds its parameter in that captured scope, never in
//! the caller's.

mod eval;
mod scope;
mod value;

pub use eval::RuntimeError;
pub use scope::Scope;
pub use value::Value;

use crate::ast::Expr;

/// Evaluate `expr` under `scope`.
pub fn eval(scope: &Scope, expr: &Expr) -> Result<Value, RuntimeError> {
    expr.eval(scope)
}

/// Evaluate a closed expression.
pub fn eval_closed(expr: &Expr) -> Result<Value, RuntimeError> {
    expr.eval(&Scope::new())
}
