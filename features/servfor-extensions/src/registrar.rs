//! Registration of data services on a [DiBuilder].
//!
//! Arguments are validated eagerly, so bad configuration fails at startup.
//! Connection factories are only built when a service is resolved.

use std::{any::type_name, collections::HashMap, sync::Arc};

use servfor_config::{Config, ConfigProvider};
use servfor_di::{DiBuilder, RequireError};

use crate::{
    contracts::{ConnectionFactory, ConnectionKey, DataService, SharedCache},
    errors::RegistrationError,
    keyed_resolver::KeyedResolver,
    options::CacheOptions,
};

/// Registers `S` for a single connection string
///
/// Registers the shared cache singleton, a transient connection factory for
/// `connection_string` and a transient `S`. Registrations already present are
/// kept, so the first single registration of `S` wins.
///
/// Fails with `NullArgument("services")` without a builder and with
/// `NullArgument("connectionString")` when the connection string is absent or blank.
pub fn add_data_service<'a, S: DataService>(
    services: Option<&'a mut DiBuilder>,
    connection_string: Option<&str>,
) -> Result<&'a mut DiBuilder, RegistrationError> {
    let services = services.ok_or(RegistrationError::NullArgument("services"))?;
    let connection_string = match connection_string {
        Some(connection_string) if !connection_string.trim().is_empty() => {
            connection_string.to_owned()
        }
        _ => return Err(RegistrationError::NullArgument("connectionString")),
    };

    add_shared_cache::<S::Cache>(services);

    services
        .try_add_transient(move |_| {
            Ok::<_, RequireError>(S::ConnectionFactory::from_connection_string(
                &connection_string,
            ))
        })
        .try_add_transient(|di| {
            let cache = di.require::<S::Cache>()?;
            let connection_factory = di.resolve::<S::ConnectionFactory>()?;
            Ok::<_, RequireError>(S::new(cache, connection_factory))
        });

    tracing::debug!("Registered {} for a single connection", type_name::<S>());
    Ok(services)
}

/// Registers a [`KeyedResolver<K, S>`] for a map of keys to connection strings
///
/// Registers the shared cache singleton, unless present, and the resolver,
/// replacing an earlier keyed registration with the same `K` and `S`.
///
/// Fails with `NullArgument("services")` without a builder, with
/// `NullArgument("connectionStringsKeyNamed")` without a map and with
/// `OutOfRange("connectionStringsKeyNamed")` when the map is empty or holds an
/// empty connection string. Other values are passed through unmodified.
pub fn add_keyed_data_service<'a, K: ConnectionKey, S: DataService>(
    services: Option<&'a mut DiBuilder>,
    connection_strings_key_named: Option<HashMap<K, String>>,
) -> Result<&'a mut DiBuilder, RegistrationError> {
    let services = services.ok_or(RegistrationError::NullArgument("services"))?;
    let connections = connection_strings_key_named
        .ok_or(RegistrationError::NullArgument("connectionStringsKeyNamed"))?;
    if connections.is_empty() {
        return Err(RegistrationError::OutOfRange("connectionStringsKeyNamed"));
    }
    if let Some((key, _)) = connections
        .iter()
        .find(|(_, connection_string)| connection_string.is_empty())
    {
        tracing::error!("Empty connection string registered for key {:?}", key);
        return Err(RegistrationError::OutOfRange("connectionStringsKeyNamed"));
    }

    add_shared_cache::<S::Cache>(services);

    let key_count = connections.len();
    let connections = Arc::new(connections);
    services.add_transient(move |di| {
        Ok::<_, RequireError>(KeyedResolver::<K, S>::new(connections.clone(), di.clone()))
    });

    tracing::debug!(
        "Registered {} for {} connection keys of {}",
        type_name::<S>(),
        key_count,
        type_name::<K>()
    );
    Ok(services)
}

/// [`add_keyed_data_service`] with connection names as keys
pub fn add_named_data_service<'a, S: DataService>(
    services: Option<&'a mut DiBuilder>,
    connection_strings_key_named: Option<HashMap<String, String>>,
) -> Result<&'a mut DiBuilder, RegistrationError> {
    add_keyed_data_service::<String, S>(services, connection_strings_key_named)
}

/// Registers the cache singleton every data service of the container shares
///
/// The cache reads `Config<CacheOptions>` and falls back to the defaults. An
/// empty [ConfigProvider] is added when none is registered yet.
fn add_shared_cache<C: SharedCache>(services: &mut DiBuilder) {
    services
        .try_add_instance(ConfigProvider::new())
        .try_add_singleton(|di| {
            let options = di
                .get::<Option<Config<CacheOptions>>>()?
                .map(Config::into_inner)
                .unwrap_or_default();
            Ok::<_, RequireError>(C::create(&options))
        });
}
