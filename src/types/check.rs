use tracing::trace;

use super::env::TypeEnv;
use super::error::TypeError;
use super::ty::Type;
use crate::ast::{Expr, Literal, Op};

/// Check a closed expression.
pub fn check_closed(expr: &Expr) -> Result<Type, TypeError> {
    let ty = check(&TypeEnv::empty(), expr)?;
    trace!(%ty, "checked expression");
    Ok(ty)
}

/// Compute the type of `expr` under `env`, or the first error found.
pub fn check(env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
    match expr {
        Expr::Lit(Literal::Int(_)) => Ok(Type::Int),
        Expr::Lit(Literal::Bool(_)) => Ok(Type::Bool),
        Expr::Var(name) => env
            .lookup(name)
            .cloned()
            .ok_or_else(|| TypeError::NotInScope(name.clone())),
        Expr::Prim(op, lhs, rhs) => check_prim(env, *op, lhs, rhs),
        Expr::If(cond, then, otherwise) => check_if(env, cond, then, otherwise),
        Expr::Lam(param, param_ty, body) => {
            let body_env = env.extend(param.clone(), param_ty.clone());
            let body_ty = check(&body_env, body)?;
            Ok(Type::arrow(param_ty.clone(), body_ty))
        }
        Expr::App(func, arg) => check_app(env, func, arg),
    }
}

/// Operand and result type of the operators with fixed signatures.
fn signature(op: Op) -> Option<(Type, Type)> {
    match op {
        Op::Add | Op::Mul => Some((Type::Int, Type::Int)),
        Op::And | Op::Or => Some((Type::Bool, Type::Bool)),
        Op::Lower | Op::Greater => Some((Type::Int, Type::Bool)),
        Op::Eq => None,
    }
}

fn check_prim(env: &TypeEnv, op: Op, lhs: &Expr, rhs: &Expr) -> Result<Type, TypeError> {
    let lhs_ty = check(env, lhs)?;
    let rhs_ty = check(env, rhs)?;

    let Some((operand, result)) = signature(op) else {
        if lhs_ty != rhs_ty {
            return Err(TypeError::mismatch(lhs_ty, rhs_ty));
        }
        if lhs_ty.is_arrow() {
            return Err(TypeError::NotComparable(lhs_ty));
        }
        return Ok(Type::Bool);
    };

    if lhs_ty != operand {
        return Err(TypeError::mismatch(operand, lhs_ty));
    }
    if rhs_ty != operand {
        return Err(TypeError::mismatch(operand, rhs_ty));
    }
    Ok(result)
}

fn check_if(env: &TypeEnv, cond: &Expr, then: &Expr, otherwise: &Expr) -> Result<Type, TypeError> {
    let cond_ty = check(env, cond)?;
    if cond_ty != Type::Bool {
        return Err(TypeError::mismatch(Type::Bool, cond_ty));
    }

    let then_ty = check(env, then)?;
    let else_ty = check(env, otherwise)?;
    if then_ty != else_ty {
        return Err(TypeError::mismatch(then_ty, else_ty));
    }
    Ok(then_ty)
}

fn check_app(env: &TypeEnv, func: &Expr, arg: &Expr) -> Result<Type, TypeError> {
    let func_ty = check(env, func)?;
    let arg_ty = check(env, arg)?;

    match func_ty {
        Type::Arrow(param, result) => {
            if *param != arg_ty {
                return Err(TypeError::mismatch(*param, arg_ty));
            }
            Ok(*result)
        }
        other => Err(TypeError::NotFunction(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_to_int() -> Type {
        Type::arrow(Type::Int, Type::Int)
    }

    #[test]
    fn test_check_literals() {
        assert_eq!(check_closed(&Expr::int(1)), Ok(Type::Int));
        assert_eq!(check_closed(&Expr::bool(false)), Ok(Type::Bool));
    }

    #[test]
    fn test_check_variable_from_env() {
        let env = TypeEnv::empty().extend("x", Type::Bool);
        assert_eq!(check(&env, &Expr::var("x")), Ok(Type::Bool));
        assert_eq!(
            check(&env, &Expr::var("y")),
            Err(TypeError::NotInScope("y".to_string()))
        );
    }

    #[test]
    fn test_check_comparison_yields_bool() {
        let expr = Expr::prim(Op::Lower, Expr::int(1), Expr::int(2));
        assert_eq!(check_closed(&expr), Ok(Type::Bool));
    }

    #[test]
    fn test_check_arithmetic_rejects_bool_operand() {
        let expr = Expr::prim(Op::Add, Expr::int(1), Expr::bool(true));
        assert_eq!(
            check_closed(&expr),
            Err(TypeError::mismatch(Type::Int, Type::Bool))
        );
    }

    #[test]
    fn test_check_left_operand_first() {
        let expr = Expr::prim(Op::And, Expr::int(1), Expr::var("missing"));
        assert_eq!(
            check_closed(&expr),
            Err(TypeError::NotInScope("missing".to_string()))
        );
        let expr = Expr::prim(Op::And, Expr::int(1), Expr::bool(true));
        assert_eq!(
            check_closed(&expr),
            Err(TypeError::mismatch(Type::Bool, Type::Int))
        );
    }

    #[test]
    fn test_check_equality() {
        let ints = Expr::prim(Op::Eq, Expr::int(1), Expr::int(2));
        assert_eq!(check_closed(&ints), Ok(Type::Bool));

        let mixed = Expr::prim(Op::Eq, Expr::int(1), Expr::bool(true));
        assert_eq!(
            check_closed(&mixed),
            Err(TypeError::mismatch(Type::Int, Type::Bool))
        );

        let id = || Expr::lam("x", Type::Int, Expr::var("x"));
        let functions = Expr::prim(Op::Eq, id(), id());
        assert_eq!(
            check_closed(&functions),
            Err(TypeError::NotComparable(int_to_int()))
        );
    }

    #[test]
    fn test_check_if() {
        let ok = Expr::if_then_else(Expr::bool(true), Expr::int(1), Expr::int(2));
        assert_eq!(check_closed(&ok), Ok(Type::Int));

        let bad_cond = Expr::if_then_else(Expr::int(0), Expr::var("nope"), Expr::int(2));
        assert_eq!(
            check_closed(&bad_cond),
            Err(TypeError::mismatch(Type::Bool, Type::Int))
        );

        let branches = Expr::if_then_else(Expr::bool(true), Expr::int(1), Expr::bool(false));
        assert_eq!(
            check_closed(&branches),
            Err(TypeError::mismatch(Type::Int, Type::Bool))
        );
    }

    #[test]
    fn test_check_lambda_and_shadowing() {
        let expr = Expr::lam(
            "x",
            Type::Int,
            Expr::lam("x", Type::Bool, Expr::var("x")),
        );
        assert_eq!(
            check_closed(&expr),
            Ok(Type::arrow(Type::Int, Type::arrow(Type::Bool, Type::Bool)))
        );
    }

    #[test]
    fn test_check_application() {
        let id = Expr::lam("x", Type::Int, Expr::var("x"));
        assert_eq!(check_closed(&Expr::app(id.clone(), Expr::int(5))), Ok(Type::Int));
        assert_eq!(
            check_closed(&Expr::app(id, Expr::bool(true))),
            Err(TypeError::mismatch(Type::Int, Type::Bool))
        );
        assert_eq!(
            check_closed(&Expr::app(Expr::int(1), Expr::int(2))),
            Err(TypeError::NotFunction(Type::Int))
        );
    }

    #[test]
    fn test_check_function_before_argument() {
        let expr = Expr::app(Expr::var("f"), Expr::var("x"));
        assert_eq!(
            check_closed(&expr),
            Err(TypeError::NotInScope("f".to_string()))
        );
    }
}
