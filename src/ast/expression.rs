use std::rc::Rc;

use crate::types::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
}

/// Built-in binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Mul,
    And,
    Or,
    Lower,
    Greater,
    Eq,
}

impl Op {
    pub const ALL: [Op; 7] = [
        Op::Add,
        Op::Mul,
        Op::And,
        Op::Or,
        Op::Lower,
        Op::Greater,
        Op::Eq,
    ];

    /// The source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Mul => "*",
            Op::And => "&&",
            Op::Or => "||",
            Op::Lower => "<",
            Op::Greater => ">",
            Op::Eq => "==",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(String),
    Lit(Literal),
    Prim(Op, Box<Expr>, Box<Expr>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    App(Box<Expr>, Box<Expr>),
    /// `\param : ty . body`. The body is shared with every closure built
    /// from this lambda.
    Lam(String, Type, Rc<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Lit(Literal::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Lit(Literal::Bool(value))
    }

    pub fn prim(op: Op, lhs: Expr, rhs: Expr) -> Self {
        Expr::Prim(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn if_then_else(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::If(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Expr::App(Box::new(func), Box::new(arg))
    }

    pub fn lam(param: impl Into<String>, ty: Type, body: Expr) -> Self {
        Expr::Lam(param.into(), ty, Rc::new(body))
    }

    /// Variables and literals never need parentheses as an operand.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Expr::Var(_) | Expr::Lit(_))
    }
}
