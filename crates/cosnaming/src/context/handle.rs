//! Context handles
//!
//! [`NamingContextHandle`] is the operation set a naming context exposes to
//! its peers. The in-process [`NamingContext`] implements it; a transport
//! proxy for a context hosted elsewhere would implement it too, translating
//! its own failures into [`NamingError`](crate::types::NamingError) values.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use super::naming_context::NamingContext;
use crate::iterator::BindingIterator;
use crate::types::{Binding, Name, ObjectKey, ObjectRef, Result};

/// Result of `list`: the first batch plus an iterator over the rest
#[derive(Debug)]
pub struct BindingList {
    pub bindings: Vec<Binding>,
    pub iterator: BindingIterator,
}

impl BindingList {
    /// True when the iterator still holds undelivered bindings
    pub fn has_more(&self) -> bool {
        self.iterator.remaining_elements() > 0
    }
}

/// Operations on a (possibly remote) naming context
pub trait NamingContextHandle: Send + Sync {
    /// Identity of the context
    fn key(&self) -> ObjectKey;

    /// Bind `obj` under `name`; fails if already bound
    fn bind(&self, name: &Name, obj: ObjectRef) -> Result<()>;

    /// Bind `obj` under `name`, replacing an existing object binding
    fn rebind(&self, name: &Name, obj: ObjectRef) -> Result<()>;

    /// Bind a context so that resolution can traverse it
    ///
    /// A binding holds a strong reference to `ctx`. Contexts bound into a
    /// cycle (a child bound back under one of its descendants) keep each
    /// other alive until one of the cycle's bindings is removed with
    /// [`unbind`](Self::unbind).
    fn bind_context(&self, name: &Name, ctx: ContextRef) -> Result<()>;

    /// Bind a context, replacing an existing context binding
    fn rebind_context(&self, name: &Name, ctx: ContextRef) -> Result<()>;

    /// Resolve `name` to the bound reference
    fn resolve(&self, name: &Name) -> Result<ObjectRef>;

    /// Remove the binding for `name`
    fn unbind(&self, name: &Name) -> Result<()>;

    /// Return up to `how_many` bindings and an iterator for the remainder
    fn list(&self, how_many: usize) -> Result<BindingList>;

    /// Create an unbound context
    fn new_context(&self) -> Result<ContextRef>;

    /// Create a context and bind it under `name`
    fn bind_new_context(&self, name: &Name) -> Result<ContextRef>;

    /// Destroy this context; it must be empty
    fn destroy(&self) -> Result<()>;

    /// The in-process context behind this handle, if there is one
    ///
    /// Gives access to local-only queries such as
    /// [`NamingContext::binding_count`].
    fn as_local(&self) -> Option<&NamingContext> {
        None
    }
}

/// Shared handle to a naming context
///
/// Equality and hashing use the context's [`ObjectKey`].
#[derive(Clone)]
pub struct ContextRef(Arc<dyn NamingContextHandle>);

impl ContextRef {
    pub fn new(handle: Arc<dyn NamingContextHandle>) -> Self {
        Self(handle)
    }

    pub fn is_local(&self) -> bool {
        self.0.as_local().is_some()
    }
}

impl Deref for ContextRef {
    type Target = dyn NamingContextHandle;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl From<Arc<NamingContext>> for ContextRef {
    fn from(ctx: Arc<NamingContext>) -> Self {
        Self(ctx)
    }
}

impl PartialEq for ContextRef {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ContextRef {}

impl Hash for ContextRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextRef({})", self.key())
    }
}
