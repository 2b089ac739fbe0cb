//! Naming service facade
//!
//! Owns the root context and the shared configuration, and resolves the
//! string and URL forms against the root.

use std::sync::Arc;

use tracing::{debug, info};

use crate::codec::{self, CorbanameUrl};
use crate::config::NamingConfig;
use crate::context::{ContextRef, NamingContext, NamingContextHandle};
use crate::store::{BindingTable, ContextStore};
use crate::types::{NamingError, ObjectRef, Result};

/// In-process naming service
///
/// Cloning is cheap: clones share the same tree.
#[derive(Clone)]
pub struct NamingService {
    /// Configuration shared with every context
    config: Arc<NamingConfig>,
    /// Root of the naming tree
    root: Arc<NamingContext>,
}

impl NamingService {
    /// Create a service whose contexts use hash-table storage
    pub fn new(config: NamingConfig) -> Self {
        Self::with_store(config, Box::new(BindingTable::new()))
    }

    /// Create a service whose root uses `store`
    ///
    /// Child contexts get a store of the same kind via
    /// [`ContextStore::new_child_store`].
    pub fn with_store(config: NamingConfig, store: Box<dyn ContextStore>) -> Self {
        let config = Arc::new(config);
        let root = NamingContext::new(store, Arc::clone(&config));
        info!(
            "naming service started (service key `{}`, root {})",
            config.service_key,
            root.key()
        );
        Self { config, root }
    }

    /// Handle to the root context
    pub fn root(&self) -> ContextRef {
        ContextRef::from(Arc::clone(&self.root))
    }

    pub fn root_context(&self) -> &NamingContext {
        &self.root
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Resolve a stringified name from the root
    pub fn resolve_str(&self, sn: &str) -> Result<ObjectRef> {
        let name = codec::parse(sn)?;
        self.root.resolve(&name)
    }

    /// Resolve a `corbaname:` URL served by this process
    ///
    /// Every address in the URL is taken to denote this service; the object
    /// key must be the configured service key. A URL without a name fragment
    /// resolves to the root context.
    pub fn resolve_url(&self, url: &str) -> Result<ObjectRef> {
        let parsed = CorbanameUrl::parse(url, &self.config)?;
        if parsed.key_string != self.config.service_key {
            return Err(NamingError::invalid_address(format!(
                "no naming context with key `{}`",
                parsed.key_string
            )));
        }
        debug!("resolving URL via {} address(es)", parsed.addresses.len());
        match parsed.name {
            Some(name) => self.root.resolve(&name),
            None => Ok(ObjectRef::Context(self.root())),
        }
    }
}

impl Default for NamingService {
    fn default() -> Self {
        Self::new(NamingConfig::default())
    }
}
