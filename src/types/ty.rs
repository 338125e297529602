use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    Arrow(Box<Type>, Box<Type>),
}

impl Type {
    pub fn arrow(from: Type, to: Type) -> Self {
        Type::Arrow(Box::new(from), Box::new(to))
    }

    pub fn is_arrow(&self) -> bool {
        matches!(self, Type::Arrow(_, _))
    }

    /// `->` associates to the right, so only an arrow on its left-hand side
    /// needs parentheses.
    pub fn pretty(&self) -> String {
        match self {
            Type::Int => "Int".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Arrow(from, to) => {
                let from_str = if from.is_arrow() {
                    format!("({})", from.pretty())
                } else {
                    from.pretty()
                };
                format!("{} -> {}", from_str, to.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_simple() {
        assert_eq!(Type::Int.pretty(), "Int");
        assert_eq!(Type::Bool.pretty(), "Bool");
    }

    #[test]
    fn test_pretty_print_function() {
        let ty = Type::arrow(Type::Int, Type::Bool);
        assert_eq!(ty.pretty(), "Int -> Bool");
    }

    #[test]
    fn test_pretty_print_curried_function() {
        let ty = Type::arrow(Type::Int, Type::arrow(Type::Int, Type::Int));
        assert_eq!(ty.pretty(), "Int -> Int -> Int");
    }

    #[test]
    fn test_pretty_print_higher_order_function() {
        let ty = Type::arrow(Type::arrow(Type::Int, Type::Int), Type::Bool);
        assert_eq!(ty.to_string(), "(Int -> Int) -> Bool");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(
            Type::arrow(Type::Int, Type::Bool),
            Type::arrow(Type::Int, Type::Bool)
        );
        assert_ne!(Type::arrow(Type::Int, Type::Bool), Type::Int);
    }
}
