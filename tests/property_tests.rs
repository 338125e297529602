//! Property-based tests for the parser, printer and evaluator

use proptest::prelude::*;
use stlc::ast::{Expr, Op};
use stlc::parser::{parse, parse_type};
use stlc::types::{check_closed, Type};

// ============================================================================
// Strategies
// ============================================================================

fn type_strategy() -> impl Strategy<Value = Type> {
    prop_oneof![Just(Type::Int), Just(Type::Bool)].prop_recursive(4, 16, 2, |inner| {
        (inner.clone(), inner).prop_map(|(from, to)| Type::arrow(from, to))
    })
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop::sample::select(Op::ALL.to_vec())
}

/// Arbitrary expressions; not necessarily well typed
fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0i64..10_000).prop_map(Expr::int),
        any::<bool>().prop_map(Expr::bool),
        prop::sample::select(vec!["x", "y", "f", "n_1", "x'"]).prop_map(Expr::var),
    ];
    leaf.prop_recursive(5, 48, 3, |inner| {
        prop_oneof![
            (op_strategy(), inner.clone(), inner.clone())
                .prop_map(|(op, lhs, rhs)| Expr::prim(op, lhs, rhs)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| Expr::if_then_else(c, t, e)),
            (inner.clone(), inner.clone()).prop_map(|(f, a)| Expr::app(f, a)),
            (
                prop::sample::select(vec!["x", "y", "f"]),
                type_strategy(),
                inner
            )
                .prop_map(|(param, ty, body)| Expr::lam(param, ty, body)),
        ]
    })
}

/// Closed expressions of type `Int`
fn int_program_strategy() -> impl Strategy<Value = Expr> {
    (0i64..100)
        .prop_map(Expr::int)
        .prop_recursive(5, 64, 3, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Expr::prim(Op::Add, a, b)),
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Expr::prim(Op::Mul, a, b)),
                (inner.clone(), inner.clone(), inner.clone(), inner.clone()).prop_map(
                    |(a, b, t, e)| {
                        let cond = Expr::prim(Op::Lower, a, b);
                        Expr::if_then_else(cond, t, e)
                    }
                ),
                (inner.clone(), inner).prop_map(|(body, arg)| {
                    // \n : Int . n + body
                    let lam = Expr::lam(
                        "n",
                        Type::Int,
                        Expr::prim(Op::Add, Expr::var("n"), body),
                    );
                    Expr::app(lam, arg)
                }),
            ]
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_type_print_parse_round_trip(ty in type_strategy()) {
        prop_assert_eq!(parse_type(&ty.to_string()), Ok(ty));
    }

    #[test]
    fn prop_expr_print_parse_round_trip(expr in expr_strategy()) {
        let printed = expr.to_string();
        prop_assert_eq!(parse(&printed), Ok(expr));
    }

    #[test]
    fn prop_parse_is_deterministic(expr in expr_strategy()) {
        let printed = expr.to_string();
        prop_assert_eq!(parse(&printed), parse(&printed));
    }

    #[test]
    fn prop_well_typed_programs_evaluate(expr in int_program_strategy()) {
        prop_assert_eq!(check_closed(&expr), Ok(Type::Int));
        let output = stlc::run(&expr.to_string());
        prop_assert!(output.ends_with(" : Int"), "unexpected output: {}", output);
    }
}
