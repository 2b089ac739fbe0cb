//! Object references held by bindings
//!
//! The transport layer that would normally mint and dispatch references is
//! outside this crate. Here a reference is either an opaque application
//! object identified by an [`ObjectKey`], or a handle to a naming context
//! that can be narrowed and invoked.

use std::fmt;

use crate::context::ContextRef;

/// 128-bit object identity
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(pub u128);

impl ObjectKey {
    /// Generate a random key
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().as_u128())
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", uuid::Uuid::from_u128(self.0))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Opaque application object
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    /// Object identity
    pub key: ObjectKey,
    /// Repository-style type identifier, e.g. `IDL:Printer:1.0`
    pub type_id: String,
}

impl ObjectHandle {
    /// Create a handle with a freshly generated key
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            key: ObjectKey::generate(),
            type_id: type_id.into(),
        }
    }

    /// Create a handle with a known key
    pub fn with_key(key: ObjectKey, type_id: impl Into<String>) -> Self {
        Self {
            key,
            type_id: type_id.into(),
        }
    }
}

/// Reference stored in (and returned from) a binding
#[derive(Clone, Debug, Default)]
pub enum ObjectRef {
    /// The null reference; never bindable
    #[default]
    Nil,
    /// Application object
    Object(ObjectHandle),
    /// Naming context, local or remote
    Context(ContextRef),
}

impl ObjectRef {
    /// Convenience constructor for an application object
    pub fn object(type_id: impl Into<String>) -> Self {
        Self::Object(ObjectHandle::new(type_id))
    }

    /// Identity of the referenced object, `None` for nil
    pub fn key(&self) -> Option<ObjectKey> {
        match self {
            Self::Nil => None,
            Self::Object(handle) => Some(handle.key),
            Self::Context(ctx) => Some(ctx.key()),
        }
    }

    /// Narrow to a naming context handle
    pub fn narrow_context(&self) -> Option<ContextRef> {
        match self {
            Self::Context(ctx) => Some(ctx.clone()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectHandle> {
        match self {
            Self::Object(handle) => Some(handle),
            _ => None,
        }
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Context(a), Self::Context(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ObjectRef {}

impl From<ObjectHandle> for ObjectRef {
    fn from(handle: ObjectHandle) -> Self {
        Self::Object(handle)
    }
}

impl From<ContextRef> for ObjectRef {
    fn from(ctx: ContextRef) -> Self {
        Self::Context(ctx)
    }
}
