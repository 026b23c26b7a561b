use std::time::Duration;

/// Options handed to the shared cache when the container first constructs it
///
/// Register them through a `ConfigProvider` instance. Without one, the cache is
/// built from [`CacheOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// Maximum number of entries, unbounded if `None`
    pub size_limit: Option<usize>,
    /// Time after which an entry is dropped, never if `None`
    pub entry_expiration: Option<Duration>,
    /// How often expired entries are swept
    pub expiration_scan_frequency: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        CacheOptions {
            size_limit: None,
            entry_expiration: None,
            expiration_scan_frequency: Duration::from_secs(60),
        }
    }
}

impl CacheOptions {
    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = Some(size_limit);
        self
    }

    pub fn with_entry_expiration(mut self, expiration: Duration) -> Self {
        self.entry_expiration = Some(expiration);
        self
    }

    pub fn with_expiration_scan_frequency(mut self, frequency: Duration) -> Self {
        self.expiration_scan_frequency = frequency;
        self
    }
}
