use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
};

use servfor_di::TypeInfo;

use crate::errors::ConfigError;

/// A provider to register all configs.
///
/// Configs can be registered and retrieved based on type.
#[derive(Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, (TypeInfo, Arc<dyn Any + Send + Sync + 'static>)>,
}

impl Debug for ConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.configs.values().map(|(info, _)| info.type_name))
            .finish()
    }
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Retrieve a config with specified type.
    ///
    /// Returns `Ok(None)` if no config of that type was added.
    pub fn get_config<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>, ConfigError> {
        self.configs
            .get(&TypeId::of::<T>())
            .map(|(info, entry)| {
                entry
                    .clone()
                    .downcast()
                    .map_err(|_| ConfigError::ConfigMissing(*info))
            })
            .transpose()
    }

    /// Add a config to the registry.
    ///
    /// If the config type is already registered, it will return a
    /// [`ConfigError`] runtime error
    pub fn add_config<T: Send + Sync + 'static>(
        &mut self,
        config: T,
    ) -> Result<&mut Self, ConfigError> {
        let info = TypeInfo::of::<T>();

        if self.configs.contains_key(&info.type_id) {
            return Err(ConfigError::ConfigAlreadyRegistered(info));
        }

        tracing::debug!("Registered config {}", info);
        self.configs.insert(info.type_id, (info, Arc::new(config)));
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Send + Sync + 'static>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(c),
            None => Ok(self),
        }
    }

    /// Returns true if a config of type `T` was added
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.configs.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct AppConfig {
        host: String,
        port: u16,
    }

    fn app_config() -> AppConfig {
        AppConfig {
            host: "localhost".to_string(),
            port: 1521,
        }
    }

    #[test]
    fn add_and_get_config() {
        let mut provider = ConfigProvider::new();
        provider.add_config(app_config()).unwrap();

        let retrieved = provider.get_config::<AppConfig>().unwrap().unwrap();
        assert_eq!(*retrieved, app_config());
        assert!(provider.contains::<AppConfig>());
    }

    #[test]
    fn missing_config_is_none() {
        let provider = ConfigProvider::new();
        assert!(provider.get_config::<AppConfig>().unwrap().is_none());
        assert!(provider.is_empty());
    }

    #[test]
    fn duplicate_config_is_rejected() {
        let mut provider = ConfigProvider::new();
        provider.add_config(app_config()).unwrap();

        let err = provider.add_config(app_config()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigAlreadyRegistered(info) if info == TypeInfo::of::<AppConfig>()));
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn maybe_add_none_is_noop() {
        let mut provider = ConfigProvider::new();
        provider.maybe_add_config::<AppConfig>(None).unwrap();
        assert!(provider.is_empty());

        provider.maybe_add_config(Some(app_config())).unwrap();
        assert_eq!(provider.len(), 1);
    }
}
