//! Expression parsers

use std::rc::Rc;

use crate::ast::{Expr, Op};
use crate::parser::combinators::{keyword, lazy, one_of, parens, some, symbol, BoxedParser};
use crate::parser::precedence::{build_expression_parser, Assoc, Operator};

use super::literal::{boolean, identifier, number};
use super::operator;
use super::types::type_expr;

/// expr := term, combined by the operators below (loosest first)
pub fn expression() -> BoxedParser<Expr> {
    build_expression_parser(
        vec![
            vec![prim("||", Op::Or, Assoc::Right)],
            vec![prim("&&", Op::And, Assoc::Right)],
            vec![prim("==", Op::Eq, Assoc::None)],
            vec![
                prim("<", Op::Lower, Assoc::None),
                prim(">", Op::Greater, Assoc::None),
            ],
            vec![prim("+", Op::Add, Assoc::Left)],
            vec![prim("*", Op::Mul, Assoc::Left)],
        ],
        term(),
    )
}

fn prim(text: &'static str, op: Op, assoc: Assoc) -> Operator<Expr> {
    operator(
        text,
        Rc::new(move |lhs: Expr, rhs: Expr| Expr::prim(op, lhs, rhs)),
        assoc,
    )
}

/// term := aexp+
///
/// Juxtaposition is application and groups to the left: `f a b` is `(f a) b`.
fn term() -> BoxedParser<Expr> {
    some(atom()) >> |(first, rest)| rest.into_iter().fold(first, Expr::app)
}

/// aexp := "(" expr ")" | bool | num | var | if | lambda
fn atom() -> BoxedParser<Expr> {
    one_of(vec![
        parens(lazy(expression)),
        boolean() >> Expr::Lit,
        number() >> Expr::Lit,
        identifier() >> Expr::Var,
        if_then_else(),
        lambda(),
    ])
}

/// if := "if" expr "then" expr "else" expr
fn if_then_else() -> BoxedParser<Expr> {
    let branch = || lazy(expression);
    ((keyword("if").spaced() * branch())
        + (keyword("then").spaced() * branch())
        + (keyword("else").spaced() * branch()))
        >> |((cond, then), otherwise)| Expr::if_then_else(cond, then, otherwise)
}

/// lambda := "\" ident ":" type "." expr
fn lambda() -> BoxedParser<Expr> {
    (symbol("\\").spaced() * identifier() - symbol(":").spaced() + type_expr()
        - symbol(".").spaced()
        + lazy(expression))
        >> |((param, ty), body)| Expr::lam(param, ty, body)
}
