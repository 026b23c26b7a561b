use std::{any::type_name, collections::HashMap, fmt::Debug, marker::PhantomData, sync::Arc};

use servfor_di::DiContainer;

use crate::{
    contracts::{ConnectionFactory, ConnectionKey, DataService},
    errors::RegistrationError,
};

/// Turns a key into a ready to use data service
///
/// Resolved from the container after a keyed registration. Every call builds a
/// new connection factory for the key's connection string and a new service,
/// all services share the container's cache.
pub struct KeyedResolver<K, S> {
    connections: Arc<HashMap<K, String>>,
    container: DiContainer,
    _service: PhantomData<fn() -> S>,
}

impl<K, S> Clone for KeyedResolver<K, S> {
    fn clone(&self) -> Self {
        KeyedResolver {
            connections: self.connections.clone(),
            container: self.container.clone(),
            _service: PhantomData,
        }
    }
}

impl<K: Debug, S> Debug for KeyedResolver<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedResolver")
            .field("service", &type_name::<S>())
            .field("keys", &self.connections.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K: ConnectionKey, S: DataService> KeyedResolver<K, S> {
    pub(crate) fn new(connections: Arc<HashMap<K, String>>, container: DiContainer) -> Self {
        KeyedResolver {
            connections,
            container,
            _service: PhantomData,
        }
    }

    /// Builds the service for `key`
    ///
    /// Fails with [`RegistrationError::KeyNotFound`] if no connection string is
    /// registered for `key`. The resolver stays usable for other keys.
    pub fn resolve(&self, key: &K) -> Result<S, RegistrationError> {
        let Some(connection_string) = self.connections.get(key) else {
            tracing::warn!(
                "No connection string registered for key {:?} of {}",
                key,
                type_name::<S>()
            );
            return Err(RegistrationError::KeyNotFound(format!("{key:?}")));
        };

        tracing::trace!("Resolving {} for key {:?}", type_name::<S>(), key);
        let cache = self.container.require::<S::Cache>()?;
        let connection_factory = S::ConnectionFactory::from_connection_string(connection_string);

        Ok(S::new(cache, connection_factory))
    }

    /// Builds the service for a key that may be absent
    ///
    /// An absent key fails with `NullArgument("key")`.
    pub fn resolve_nullable(&self, key: Option<&K>) -> Result<S, RegistrationError> {
        match key {
            Some(key) => self.resolve(key),
            None => Err(RegistrationError::NullArgument("key")),
        }
    }

    /// Converts the resolver into a plain function value
    pub fn into_fn(self) -> impl Fn(&K) -> Result<S, RegistrationError> + Send + Sync + Clone {
        move |key: &K| self.resolve(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.connections.contains_key(key)
    }

    /// Keys with a connection string, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.connections.keys()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use servfor_di::DiBuilder;

    use super::*;
    use crate::testing::{FakeCache, FakeService};

    fn resolver(entries: &[(&str, &str)]) -> KeyedResolver<String, FakeService> {
        let connections = entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let mut builder = DiBuilder::new();
        builder.add_instance(FakeCache::default());

        KeyedResolver::new(Arc::new(connections), builder.build())
    }

    #[test]
    fn resolve_passes_connection_string_through() {
        let resolver = resolver(&[("primary", " Data Source=db1; ")]);

        let service = resolver.resolve(&"primary".to_string()).unwrap();
        assert_eq!(service.connection_string(), " Data Source=db1; ");
    }

    #[test]
    fn unknown_key_carries_key() {
        let resolver = resolver(&[("primary", "cs")]);

        let err = resolver.resolve(&"replica".to_string()).unwrap_err();
        assert!(matches!(err, RegistrationError::KeyNotFound(key) if key == "\"replica\""));
        assert!(resolver.resolve(&"primary".to_string()).is_ok());
    }

    #[test]
    fn absent_key_is_null_argument() {
        let resolver = resolver(&[("primary", "cs")]);

        let err = resolver.resolve_nullable(None).unwrap_err();
        assert!(matches!(err, RegistrationError::NullArgument("key")));
    }

    #[test]
    fn missing_cache_surfaces_require_error() {
        let connections = HashMap::from([("primary".to_string(), "cs".to_string())]);
        let resolver =
            KeyedResolver::<String, FakeService>::new(Arc::new(connections), DiBuilder::new().build());

        let err = resolver.resolve(&"primary".to_string()).unwrap_err();
        assert!(matches!(err, RegistrationError::Require(_)));
    }

    #[test]
    fn function_value_and_introspection() {
        let resolver = resolver(&[("a", "csA"), ("b", "csB")]);
        assert_eq!(resolver.len(), 2);
        assert!(resolver.contains_key(&"a".to_string()));
        assert!(!resolver.is_empty());

        let mut keys: Vec<_> = resolver.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["a", "b"]);

        let locate = resolver.into_fn();
        assert_eq!(locate(&"b".to_string()).unwrap().connection_string(), "csB");
    }
}
