//! Bindings as reported by `list` and the binding iterator

use super::name::{Name, NameComponent};

/// What a binding refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// A plain object reference
    Object,
    /// A naming context that resolution may traverse
    Context,
}

/// A bound name and the type of the binding
///
/// `name` holds the single bound component. The type is fixed when the
/// binding is created; a rebind replaces the binding rather than mutating it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    pub name: Name,
    pub binding_type: BindingType,
}

impl Binding {
    /// Create a binding for one component
    pub fn new(component: NameComponent, binding_type: BindingType) -> Self {
        Self {
            name: Name::single(component),
            binding_type,
        }
    }

    /// The well-formed placeholder returned by an exhausted iterator
    pub fn empty() -> Self {
        Self {
            name: Name::default(),
            binding_type: BindingType::Object,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// The bound component
    pub fn component(&self) -> Option<&NameComponent> {
        self.name.first()
    }

    pub fn is_context(&self) -> bool {
        self.binding_type == BindingType::Context
    }
}
