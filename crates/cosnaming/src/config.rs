//! Naming service configuration

/// Well-known object key of the root naming context
pub const DEFAULT_SERVICE_KEY: &str = "NameService";

/// Default IIOP port for naming service URLs
pub const DEFAULT_IIOP_PORT: u16 = 2809;

/// Configuration shared by every context of one naming tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingConfig {
    /// Object key assumed when a corbaname URL has none
    pub service_key: String,
    /// Port assumed when a corbaname URL address has none
    pub default_port: u16,
    /// Ceiling on bindings delivered by one `list` or `next_n` call
    pub max_batch_size: Option<usize>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            service_key: DEFAULT_SERVICE_KEY.to_string(),
            default_port: DEFAULT_IIOP_PORT,
            max_batch_size: None,
        }
    }
}

impl NamingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = key.into();
        self
    }

    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    /// Cap batch sizes; `0` is treated as "no cap"
    pub fn with_max_batch_size(mut self, limit: usize) -> Self {
        self.max_batch_size = (limit > 0).then_some(limit);
        self
    }

    /// Apply the batch ceiling to a requested count
    pub fn clamp_batch(&self, how_many: usize) -> usize {
        match self.max_batch_size {
            Some(limit) => how_many.min(limit),
            None => how_many,
        }
    }
}
