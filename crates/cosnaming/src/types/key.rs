//! Hash-map key for a single name component

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::name::NameComponent;

/// Map key wrapping one [`NameComponent`]
///
/// The hash over `(id, kind)` is computed once at construction so that
/// repeated lookups of the same key do not rehash both strings.
#[derive(Clone, Debug)]
pub struct BindingKey {
    component: NameComponent,
    hash: u64,
}

impl BindingKey {
    /// Create a key for a component
    pub fn new(component: &NameComponent) -> Self {
        let mut hasher = DefaultHasher::new();
        component.id.hash(&mut hasher);
        component.kind.hash(&mut hasher);
        Self {
            component: component.clone(),
            hash: hasher.finish(),
        }
    }

    /// The wrapped component
    pub fn component(&self) -> &NameComponent {
        &self.component
    }

    /// The precomputed hash value
    pub fn precomputed_hash(&self) -> u64 {
        self.hash
    }

    pub fn into_component(self) -> NameComponent {
        self.component
    }
}

impl PartialEq for BindingKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.component == other.component
    }
}

impl Eq for BindingKey {}

impl Hash for BindingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl From<&NameComponent> for BindingKey {
    fn from(component: &NameComponent) -> Self {
        Self::new(component)
    }
}

impl From<NameComponent> for BindingKey {
    fn from(component: NameComponent) -> Self {
        Self::new(&component)
    }
}
