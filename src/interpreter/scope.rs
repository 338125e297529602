use std::rc::Rc;

use super::value::Value;

#[derive(Debug)]
struct Frame {
    name: String,
    value: Value,
    parent: Option<Rc<Frame>>,
}

/// Persistent variable bindings.
///
/// Binding a name returns a new scope and leaves `self` untouched, so a
/// closure can hold on to the scope it was created in while evaluation
/// continues elsewhere.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    innermost: Option<Rc<Frame>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Resolve a name by searching from innermost to outermost binding
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        let mut frame = self.innermost.as_deref();
        while let Some(current) = frame {
            if current.name == name {
                return Some(&current.value);
            }
            frame = current.parent.as_deref();
        }
        None
    }

    pub fn bind(&self, name: impl Into<String>, value: Value) -> Scope {
        Scope {
            innermost: Some(Rc::new(Frame {
                name: name.into(),
                value,
                parent: self.innermost.clone(),
            })),
        }
    }
}
