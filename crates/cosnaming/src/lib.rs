//! Hierarchical naming service
//!
//! This crate provides an in-process implementation of a CosNaming-style
//! directory: a tree of naming contexts that bind names to object references
//! or to other contexts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  NamingService (service.rs)                 │
//! │            root context, resolve_str, resolve_url           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Naming Context        │  Binding Iterator  │  Name Codec   │
//! │  - bind / rebind       │  - snapshot        │  - a.b/c\.d   │
//! │  - resolve / unbind    │  - next_one/next_n │  - corbaname: │
//! │  - list / destroy      │  - destroy         │    URLs       │
//! ├─────────────────────────────────────────────────────────────┤
//! │            ContextStore (hash table / sorted table)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! - **Name**: sequence of `(id, kind)` components, resolved left to right
//! - **Binding**: a component mapped to an object or to a context
//! - **Context binding**: the only kind resolution traverses
//! - **Stringified name**: `id.kind/id.kind` with `\` escaping
//!
//! # Modules
//!
//! - [`types`]: names, bindings, object references, errors
//! - [`codec`]: stringified names and corbaname URLs
//! - [`store`]: per-context storage backends
//! - [`context`]: naming contexts
//! - [`iterator`]: binding iterators
//! - [`config`]: service configuration
//! - [`service`]: the service facade

pub mod codec;
pub mod config;
pub mod context;
pub mod iterator;
pub mod service;
pub mod store;
pub mod types;

pub use config::NamingConfig;
pub use context::{BindingList, ContextRef, NamingContext, NamingContextExt, NamingContextHandle};
pub use iterator::BindingIterator;
pub use service::NamingService;
pub use store::{BindingEntry, BindingTable, ContextStore, SortedBindingTable};
pub use types::{
    Binding, BindingType, Name, NameComponent, NamingError, NotFoundReason, ObjectHandle,
    ObjectKey, ObjectRef, Result,
};
