use std::fmt;
use std::rc::Rc;

use crate::ast::Expr;

use super::scope::Scope;

/// Runtime value representation
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    /// A lambda together with the scope it was created in
    Closure {
        param: String,
        body: Rc<Expr>,
        env: Scope,
    },
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Closure { .. } => "closure",
        }
    }
}

/// Closures are opaque; two closures never compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Closure { .. } => write!(f, "<<closure>>"),
        }
    }
}
