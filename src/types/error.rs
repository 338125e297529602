use thiserror::Error;

use super::ty::Type;

/// Reasons a well-formed expression can be rejected by the checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Two types that must agree do not.
    #[error("Couldn't match expected type '{expected}' with actual type: '{actual}'")]
    Mismatch { expected: Type, actual: Type },

    /// The left-hand side of an application is not a function.
    #[error("Tried to apply to non function type: '{0}'")]
    NotFunction(Type),

    #[error("Variable not in scope: {0}")]
    NotInScope(String),

    /// `==` on functions; only `Int` and `Bool` values can be compared.
    #[error("Cannot compare values of function type: '{0}'")]
    NotComparable(Type),
}

impl TypeError {
    pub fn mismatch(expected: Type, actual: Type) -> Self {
        TypeError::Mismatch { expected, actual }
    }
}
