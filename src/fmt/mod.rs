//! Pretty printing.
//!
//! [`render_result`] produces the `value : type` line shown for a successful
//! run. The [`Display`] impl for [`Expr`] prints source text that parses back
//! to the same tree: every operand that is not a variable or a literal is
//! wrapped in parentheses.

use std::fmt::{self, Display};

use crate::ast::{Expr, Literal, Op};
use crate::interpreter::Value;
use crate::types::Type;

/// `<value> : <type>`
pub fn render_result(value: &Value, ty: &Type) -> String {
    format!("{value} : {ty}")
}

struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_expr(self, &mut formatter);
        write!(f, "{}", formatter.finish())
    }
}

fn format_expr(expr: &Expr, fmt: &mut Formatter) {
    match expr {
        Expr::Var(name) => fmt.write_str(name),
        Expr::Lit(literal) => fmt.write_str(&literal.to_string()),
        Expr::Prim(op, lhs, rhs) => {
            format_operand(lhs, fmt);
            fmt.write_str(&format!(" {op} "));
            format_operand(rhs, fmt);
        }
        Expr::If(cond, then, otherwise) => {
            fmt.write_str("if ");
            format_expr(cond, fmt);
            fmt.write_str(" then ");
            format_expr(then, fmt);
            fmt.write_str(" else ");
            format_expr(otherwise, fmt);
        }
        Expr::App(func, arg) => {
            format_operand(func, fmt);
            fmt.write_str(" ");
            format_operand(arg, fmt);
        }
        Expr::Lam(param, ty, body) => {
            fmt.write_str(&format!("\\{param} : {ty} . "));
            format_expr(body, fmt);
        }
    }
}

fn format_operand(expr: &Expr, fmt: &mut Formatter) {
    if expr.is_atomic() {
        format_expr(expr, fmt);
    } else {
        fmt.write_str("(");
        format_expr(expr, fmt);
        fmt.write_str(")");
    }
}
