use servfor_di::TypeInfo;

/// Errors when registering or retrieving a config
#[derive(thiserror::Error, Debug, Clone)]
pub enum ConfigError {
    /// The stored config could not be read as the requested type
    #[error("The config '{0}' could not be read as the requested type")]
    ConfigMissing(TypeInfo),
    /// The config type is already registered
    #[error("The config type '{0}' is already registered")]
    ConfigAlreadyRegistered(TypeInfo),
}
