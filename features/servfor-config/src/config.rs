use std::{any::type_name, ops::Deref, sync::Arc};

use servfor_di::{DiContainer, RequireError, Resolver};

use crate::provider::ConfigProvider;

/// A wrapper type to allow for config injections
///
/// This provides a simple way to retrieve configs from the config registry
/// inside a factory. The [ConfigProvider] has to be registered as an instance.
///
/// # Example
/// ```rust
/// use servfor_config::{Config, ConfigProvider};
/// use servfor_di::DiBuilder;
///
/// #[derive(Clone)]
/// pub struct PoolConfig {
///     size: usize,
/// }
///
/// let mut configs = ConfigProvider::new();
/// configs.add_config(PoolConfig { size: 4 }).unwrap();
///
/// let mut builder = DiBuilder::new();
/// builder.add_instance(configs);
/// let container = builder.build();
///
/// let config = container.get::<Config<PoolConfig>>().unwrap();
/// assert_eq!(config.size, 4);
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Send + Sync + 'static> Resolver for Config<T> {
    fn resolve(di: &DiContainer) -> Result<Self, RequireError>
    where
        Self: Sized,
    {
        let config_name = type_name::<T>();
        let config_provider = di.require::<ConfigProvider>()?;

        let config: Arc<T> = config_provider
            .get_config()
            .map_err(|_| RequireError::DowncastFailed {
                required_type: config_name,
                actual_type: type_name::<ConfigProvider>(),
            })?
            .ok_or(RequireError::TypeMissing(config_name))?;

        Ok(Config { inner: config })
    }
}

#[cfg(test)]
mod tests {
    use servfor_di::DiBuilder;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Timeout(u64);

    #[test]
    fn resolves_registered_config() {
        let mut configs = ConfigProvider::new();
        configs.add_config(Timeout(30)).unwrap();
        let mut builder = DiBuilder::new();
        builder.add_instance(configs);
        let container = builder.build();

        let config = container.get::<Config<Timeout>>().unwrap();
        assert_eq!(*config, Timeout(30));
    }

    #[test]
    fn missing_config_is_type_missing() {
        let mut builder = DiBuilder::new();
        builder.add_instance(ConfigProvider::new());
        let container = builder.build();

        let result = container.get::<Config<Timeout>>();
        assert!(matches!(result, Err(RequireError::TypeMissing(name)) if name == type_name::<Timeout>()));
    }

    #[test]
    fn optional_config_without_provider() {
        let container = DiBuilder::new().build();

        let config = container.get::<Option<Config<Timeout>>>().unwrap();
        assert!(config.is_none());
    }
}
