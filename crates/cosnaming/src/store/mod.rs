//! Per-context binding storage
//!
//! A [`ContextStore`] is the pluggable backend behind one naming context. It
//! is only ever touched while the owning context holds its lock, so
//! implementations need no synchronization of their own.

mod table;

pub use table::{BindingTable, SortedBindingTable};

use crate::types::{Binding, BindingKey, BindingType, ObjectRef};

/// Stored value: the binding plus the reference it resolves to
#[derive(Clone, Debug)]
pub struct BindingEntry {
    pub binding: Binding,
    pub target: ObjectRef,
}

impl BindingEntry {
    pub fn new(binding: Binding, target: ObjectRef) -> Self {
        Self { binding, target }
    }

    pub fn binding_type(&self) -> BindingType {
        self.binding.binding_type
    }
}

/// Storage backend contract for one naming context
pub trait ContextStore: Send {
    /// Insert an entry, returning the one it replaced
    fn put(&mut self, key: BindingKey, entry: BindingEntry) -> Option<BindingEntry>;

    /// Look up an entry
    fn get(&self, key: &BindingKey) -> Option<BindingEntry>;

    /// Remove an entry
    fn remove(&mut self, key: &BindingKey) -> Option<BindingEntry>;

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every entry, for building an iterator
    fn snapshot(&self) -> Vec<BindingEntry>;

    /// Fresh, empty backend for a child context of the same kind
    fn new_child_store(&self) -> Box<dyn ContextStore>;

    /// Release storage when the owning context is destroyed
    fn destroy(&mut self);
}
