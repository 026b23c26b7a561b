//! Registers data-access services, bound to connection strings, on a
//! [servfor_di::DiBuilder].
//!
//! Three shapes of connection configuration are supported:
//!
//! 1. A single connection string - the container serves the service type directly
//! 2. A map of keys to connection strings - the container serves a
//!    [KeyedResolver] turning a key into a service
//! 3. Connection strings listed in the order of an enum's members, see
//!    [connection_enum!]
//!
//! Every service of a container shares one cache, every service gets its own
//! connection factory.
//!
//! ```rust
//! use std::{collections::HashMap, sync::Arc};
//!
//! use servfor_di::DiBuilder;
//! use servfor_extensions::{
//!     CacheOptions, ConnectionFactory, DataService, DataServiceBuilderExt, KeyedResolver,
//!     SharedCache,
//! };
//!
//! struct MetadataCache;
//! impl SharedCache for MetadataCache {
//!     fn create(_: &CacheOptions) -> Self {
//!         MetadataCache
//!     }
//! }
//!
//! struct Connections(String);
//! impl ConnectionFactory for Connections {
//!     fn from_connection_string(connection_string: &str) -> Self {
//!         Connections(connection_string.to_string())
//!     }
//! }
//!
//! struct Orders {
//!     cache: Arc<MetadataCache>,
//!     connections: Connections,
//! }
//! impl DataService for Orders {
//!     type Cache = MetadataCache;
//!     type ConnectionFactory = Connections;
//!
//!     fn new(cache: Arc<MetadataCache>, connections: Connections) -> Self {
//!         Orders { cache, connections }
//!     }
//! }
//!
//! let mut builder = DiBuilder::new();
//! builder
//!     .add_named_data_service::<Orders>(HashMap::from([
//!         ("eu".to_string(), "Data Source=eu-db".to_string()),
//!         ("us".to_string(), "Data Source=us-db".to_string()),
//!     ]))
//!     .unwrap();
//! let container = builder.build();
//!
//! let resolver = container.resolve::<KeyedResolver<String, Orders>>().unwrap();
//! let eu = resolver.resolve(&"eu".to_string()).unwrap();
//! let us = resolver.resolve(&"us".to_string()).unwrap();
//!
//! assert_eq!(eu.connections.0, "Data Source=eu-db");
//! assert!(Arc::ptr_eq(&eu.cache, &us.cache));
//! ```

pub mod builder_ext;
pub mod contracts;
pub mod enum_binder;
pub mod errors;
pub mod keyed_resolver;
pub mod options;
pub mod registrar;

#[cfg(test)]
mod testing;

pub use builder_ext::DataServiceBuilderExt;
pub use contracts::{ConnectionFactory, ConnectionKey, DataService, SharedCache};
pub use enum_binder::{add_enum_data_service, zip_connections, ConnectionEnum};
pub use errors::RegistrationError;
pub use keyed_resolver::KeyedResolver;
pub use options::CacheOptions;
pub use registrar::{add_data_service, add_keyed_data_service, add_named_data_service};
