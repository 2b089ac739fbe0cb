//! Core naming types
//!
//! - Names: `NameComponent`, `Name`
//! - Map keys: `BindingKey`
//! - Bindings: `Binding`, `BindingType`
//! - Object references: `ObjectKey`, `ObjectHandle`, `ObjectRef`
//! - Errors: `NamingError`, `NotFoundReason`

mod binding;
mod error;
mod key;
mod name;
mod objref;

pub use binding::{Binding, BindingType};
pub use error::{NamingError, NotFoundReason, Result};
pub use key::BindingKey;
pub use name::{Name, NameComponent};
pub use objref::{ObjectHandle, ObjectKey, ObjectRef};
