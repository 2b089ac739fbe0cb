//! Binding iterator
//!
//! An iterator owns a copy of a context's bindings taken when `list` ran.
//! Later binds and unbinds on the live context are not observed, so an
//! in-progress enumeration can return stale entries or miss new ones, but is
//! never disturbed by concurrent mutation.
//!
//! Each binding is delivered at most once, even when the iterator is shared
//! between threads.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::debug;

use crate::types::{Binding, NamingError, ObjectKey, Result};

struct IteratorState {
    pending: VecDeque<Binding>,
    destroyed: bool,
}

/// Cursor over a snapshot of one context's bindings
pub struct BindingIterator {
    key: ObjectKey,
    max_batch_size: Option<usize>,
    state: Mutex<IteratorState>,
}

impl BindingIterator {
    /// Create an iterator over `snapshot`
    pub fn new(snapshot: Vec<Binding>) -> Self {
        Self::with_batch_limit(snapshot, None)
    }

    /// Create an iterator whose `next_n` never returns more than `limit`
    pub fn with_batch_limit(snapshot: Vec<Binding>, limit: Option<usize>) -> Self {
        Self {
            key: ObjectKey::generate(),
            max_batch_size: limit,
            state: Mutex::new(IteratorState {
                pending: snapshot.into(),
                destroyed: false,
            }),
        }
    }

    pub fn key(&self) -> ObjectKey {
        self.key
    }

    /// Deliver the next binding
    ///
    /// When exhausted, returns an empty binding and `false`.
    pub fn next_one(&self) -> Result<(Binding, bool)> {
        let mut state = self.state.lock();
        if state.destroyed {
            return Err(NamingError::ObjectNotExist);
        }
        Ok(match state.pending.pop_front() {
            Some(binding) => (binding, true),
            None => (Binding::empty(), false),
        })
    }

    /// Deliver up to `how_many` bindings
    ///
    /// The flag is `true` when at least one binding was delivered.
    pub fn next_n(&self, how_many: usize) -> Result<(Vec<Binding>, bool)> {
        if how_many == 0 {
            return Err(NamingError::bad_param("next_n requires how_many > 0"));
        }
        let how_many = match self.max_batch_size {
            Some(limit) => how_many.min(limit),
            None => how_many,
        };
        let batch = self.take(how_many)?;
        let delivered = !batch.is_empty();
        Ok((batch, delivered))
    }

    /// Remove up to `how_many` bindings from the front of the snapshot
    pub(crate) fn take(&self, how_many: usize) -> Result<Vec<Binding>> {
        let mut state = self.state.lock();
        if state.destroyed {
            return Err(NamingError::ObjectNotExist);
        }
        let count = how_many.min(state.pending.len());
        Ok(state.pending.drain(..count).collect())
    }

    /// Number of bindings not yet delivered
    pub fn remaining_elements(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    /// Release the snapshot; calling it again is a no-op
    pub fn destroy(&self) {
        let mut state = self.state.lock();
        if state.destroyed {
            return;
        }
        debug!(
            "destroying binding iterator {} ({} undelivered)",
            self.key,
            state.pending.len()
        );
        state.pending = VecDeque::new();
        state.destroyed = true;
    }
}

impl std::fmt::Debug for BindingIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingIterator")
            .field("key", &self.key)
            .field("remaining", &self.remaining_elements())
            .finish()
    }
}
