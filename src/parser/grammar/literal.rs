//! Literal parsers

use crate::ast::Literal;
use crate::parser::combinators::{int, keyword, one_of, variable, BoxedParser, VariableRules};

const RESERVED: &[&str] = &["True", "False", "if", "then", "else", "fi"];

/// bool := "True" | "False"
pub fn boolean() -> BoxedParser<Literal> {
    one_of(vec![
        keyword("True") >> |_| Literal::Bool(true),
        keyword("False") >> |_| Literal::Bool(false),
    ])
    .spaced()
}

/// num := digit+
pub fn number() -> BoxedParser<Literal> {
    int().backtrackable().spaced() >> Literal::Int
}

/// ident := lower (alnum | "_" | "'")*
pub fn identifier() -> BoxedParser<String> {
    variable(VariableRules {
        start: |c| c.is_ascii_lowercase(),
        inner: |c| c.is_ascii_alphanumeric() || c == '_' || c == '\'',
        reserved: RESERVED,
    })
    .spaced()
}
