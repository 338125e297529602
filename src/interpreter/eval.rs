use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{Expr, Literal, Op};

use super::scope::Scope;
use super::value::Value;

/// Failure while evaluating an expression that was not type checked first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RuntimeError(pub String);

impl RuntimeError {
    fn operand(op: Op, expected: &str, found: &Value) -> Self {
        RuntimeError(format!(
            "operator `{}` expects {} operands, found {}",
            op.symbol(),
            expected,
            found.kind()
        ))
    }
}

impl Expr {
    pub fn eval(&self, scope: &Scope) -> Result<Value, RuntimeError> {
        match self {
            Expr::Lit(Literal::Int(n)) => Ok(Value::Int(*n)),
            Expr::Lit(Literal::Bool(b)) => Ok(Value::Bool(*b)),
            Expr::Var(name) => scope
                .resolve(name)
                .cloned()
                .ok_or_else(|| RuntimeError(format!("undefined variable: {name}"))),
            Expr::Prim(op, lhs, rhs) => {
                let left = lhs.eval(scope)?;
                let right = rhs.eval(scope)?;
                apply_prim(*op, left, right)
            }
            Expr::If(cond, then, otherwise) => {
                let cond = cond.eval(scope)?;
                // Both branches are evaluated before the condition picks one.
                let then = then.eval(scope);
                let otherwise = otherwise.eval(scope);
                trace!(%cond, "evaluated both branches of if");
                match cond {
                    Value::Bool(true) => then,
                    Value::Bool(false) => otherwise,
                    other => Err(RuntimeError(format!(
                        "if condition must be a boolean, found {}",
                        other.kind()
                    ))),
                }
            }
            Expr::Lam(param, _, body) => Ok(Value::Closure {
                param: param.clone(),
                body: body.clone(),
                env: scope.clone(),
            }),
            Expr::App(func, arg) => {
                let func = func.eval(scope)?;
                let arg = arg.eval(scope)?;
                match func {
                    Value::Closure { param, body, env } => {
                        debug!(%param, %arg, "applying closure");
                        body.eval(&env.bind(param, arg))
                    }
                    other => Err(RuntimeError(format!(
                        "cannot call non-function value: {other}"
                    ))),
                }
            }
        }
    }
}

fn apply_prim(op: Op, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op {
        Op::Add | Op::Mul | Op::Lower | Op::Greater => {
            let (Value::Int(a), Value::Int(b)) = (&left, &right) else {
                let found = if matches!(left, Value::Int(_)) { &right } else { &left };
                return Err(RuntimeError::operand(op, "integer", found));
            };
            Ok(match op {
                Op::Add => Value::Int(a.wrapping_add(*b)),
                Op::Mul => Value::Int(a.wrapping_mul(*b)),
                Op::Lower => Value::Bool(a < b),
                _ => Value::Bool(a > b),
            })
        }
        Op::And | Op::Or => {
            let (Value::Bool(a), Value::Bool(b)) = (&left, &right) else {
                let found = if matches!(left, Value::Bool(_)) { &right } else { &left };
                return Err(RuntimeError::operand(op, "boolean", found));
            };
            Ok(Value::Bool(if op == Op::And { *a && *b } else { *a || *b }))
        }
        Op::Eq => match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a == b)),
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a == b)),
            _ => Err(RuntimeError(format!(
                "cannot compare {} with {}",
                left.kind(),
                right.kind()
            ))),
        },
    }
}
