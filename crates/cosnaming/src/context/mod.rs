//! Naming contexts
//!
//! - [`NamingContextHandle`]: the operation set of a context
//! - [`ContextRef`]: shared, comparable handle to a context
//! - [`NamingContext`]: the in-process implementation
//! - [`NamingContextExt`]: stringified-name and URL helpers

mod ext;
mod handle;
mod naming_context;

pub use ext::NamingContextExt;
pub use handle::{BindingList, ContextRef, NamingContextHandle};
pub use naming_context::NamingContext;
