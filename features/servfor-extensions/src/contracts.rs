//! Contracts the registration layer needs from its collaborators.
//!
//! The data service, the connection factory and the cache live outside this
//! crate. Registration only wires them together.

use std::{fmt::Debug, hash::Hash, sync::Arc};

use servfor_di::Injectable;

use crate::options::CacheOptions;

/// Anything usable as the key of a connection map
pub trait ConnectionKey: Eq + Hash + Debug + Injectable {}
impl<T: Eq + Hash + Debug + Injectable> ConnectionKey for T {}

/// Opens physical database connections for one connection string
pub trait ConnectionFactory: Injectable + Sized {
    /// Binds a new factory to `connection_string`, which is passed through unmodified
    fn from_connection_string(connection_string: &str) -> Self;
}

/// Cache shared by every data service of a container
///
/// Implementations must be safe for concurrent use, the registration layer
/// adds no locking of its own.
pub trait SharedCache: Injectable + Sized {
    fn create(options: &CacheOptions) -> Self;
}

/// A data-access service built from the shared cache and a connection factory
pub trait DataService: Injectable + Sized {
    type Cache: SharedCache;
    type ConnectionFactory: ConnectionFactory;

    fn new(cache: Arc<Self::Cache>, connection_factory: Self::ConnectionFactory) -> Self;
}
