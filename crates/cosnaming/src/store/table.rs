//! In-memory binding tables

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::{BindingEntry, ContextStore};
use crate::types::{BindingKey, NameComponent};

/// Hash table keyed by [`BindingKey`]
///
/// Snapshot order is unspecified.
#[derive(Debug, Default)]
pub struct BindingTable {
    entries: HashMap<BindingKey, BindingEntry>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContextStore for BindingTable {
    fn put(&mut self, key: BindingKey, entry: BindingEntry) -> Option<BindingEntry> {
        self.entries.insert(key, entry)
    }

    fn get(&self, key: &BindingKey) -> Option<BindingEntry> {
        self.entries.get(key).cloned()
    }

    fn remove(&mut self, key: &BindingKey) -> Option<BindingEntry> {
        self.entries.remove(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn snapshot(&self) -> Vec<BindingEntry> {
        self.entries.values().cloned().collect()
    }

    fn new_child_store(&self) -> Box<dyn ContextStore> {
        Box::new(Self::new())
    }

    fn destroy(&mut self) {
        trace!("releasing binding table ({} entries)", self.entries.len());
        self.entries = HashMap::new();
    }
}

/// Ordered table; snapshots come back sorted by `(id, kind)`
#[derive(Debug, Default)]
pub struct SortedBindingTable {
    entries: BTreeMap<NameComponent, BindingEntry>,
}

impl SortedBindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContextStore for SortedBindingTable {
    fn put(&mut self, key: BindingKey, entry: BindingEntry) -> Option<BindingEntry> {
        self.entries.insert(key.into_component(), entry)
    }

    fn get(&self, key: &BindingKey) -> Option<BindingEntry> {
        self.entries.get(key.component()).cloned()
    }

    fn remove(&mut self, key: &BindingKey) -> Option<BindingEntry> {
        self.entries.remove(key.component())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn snapshot(&self) -> Vec<BindingEntry> {
        self.entries.values().cloned().collect()
    }

    fn new_child_store(&self) -> Box<dyn ContextStore> {
        Box::new(Self::new())
    }

    fn destroy(&mut self) {
        trace!("releasing sorted binding table ({} entries)", self.entries.len());
        self.entries.clear();
    }
}
