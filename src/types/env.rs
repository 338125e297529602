use std::rc::Rc;

use super::ty::Type;

#[derive(Debug)]
struct Binding {
    name: String,
    ty: Type,
    next: Option<Rc<Binding>>,
}

/// Typing context: the annotated parameters of the enclosing lambdas.
///
/// A persistent list, innermost binding first. Extending shares the tail with
/// the outer environment, so nothing is copied when entering a lambda.
#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    head: Option<Rc<Binding>>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv::default()
    }

    pub fn with_bindings(bindings: Vec<(String, Type)>) -> Self {
        bindings
            .into_iter()
            .fold(TypeEnv::empty(), |env, (name, ty)| env.extend(name, ty))
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        let mut current = self.head.as_deref();
        while let Some(binding) = current {
            if binding.name == name {
                return Some(&binding.ty);
            }
            current = binding.next.as_deref();
        }
        None
    }

    pub fn extend(&self, name: impl Into<String>, ty: Type) -> TypeEnv {
        TypeEnv {
            head: Some(Rc::new(Binding {
                name: name.into(),
                ty,
                next: self.head.clone(),
            })),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
