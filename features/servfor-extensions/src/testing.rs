//! Fake collaborators for unit tests.

use std::sync::Arc;

use crate::{
    contracts::{ConnectionFactory, DataService, SharedCache},
    options::CacheOptions,
};

#[derive(Debug, Default)]
pub(crate) struct FakeCache {
    pub options: CacheOptions,
}

impl SharedCache for FakeCache {
    fn create(options: &CacheOptions) -> Self {
        FakeCache {
            options: options.clone(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct FakeConnectionFactory(String);

impl ConnectionFactory for FakeConnectionFactory {
    fn from_connection_string(connection_string: &str) -> Self {
        FakeConnectionFactory(connection_string.to_string())
    }
}

#[derive(Debug)]
pub(crate) struct FakeService {
    pub cache: Arc<FakeCache>,
    pub connections: FakeConnectionFactory,
}

impl FakeService {
    pub fn connection_string(&self) -> &str {
        &self.connections.0
    }
}

impl DataService for FakeService {
    type Cache = FakeCache;
    type ConnectionFactory = FakeConnectionFactory;

    fn new(cache: Arc<FakeCache>, connections: FakeConnectionFactory) -> Self {
        FakeService { cache, connections }
    }
}
