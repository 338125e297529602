//! Type annotation parsers

use std::rc::Rc;

use crate::parser::combinators::{keyword, lazy, one_of, parens, BoxedParser};
use crate::parser::precedence::{build_expression_parser, Assoc, Combine};
use crate::types::Type;

use super::operator;

/// type := ty_atom ("->" type)?
pub fn type_expr() -> BoxedParser<Type> {
    let arrow: Combine<Type> = Rc::new(Type::arrow);
    build_expression_parser(vec![vec![operator("->", arrow, Assoc::Right)]], type_atom())
}

/// ty_atom := "Int" | "Bool" | "(" type ")"
fn type_atom() -> BoxedParser<Type> {
    one_of(vec![
        parens(lazy(type_expr)),
        keyword("Int").spaced() >> |_| Type::Int,
        keyword("Bool").spaced() >> |_| Type::Bool,
    ])
}
