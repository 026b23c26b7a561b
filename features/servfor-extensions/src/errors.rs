use servfor_di::RequireError;
use thiserror::Error;

/// Errors raised while registering data services or resolving them by key
#[derive(Error, Debug, Clone)]
pub enum RegistrationError {
    /// A required argument was absent or blank
    #[error("Value cannot be null. (Parameter '{0}')")]
    NullArgument(&'static str),
    /// An argument was present but its content is invalid
    #[error("Specified argument was out of the range of valid values. (Parameter '{0}')")]
    OutOfRange(&'static str),
    /// A resolver was called with a key it has no connection string for
    #[error("The given key '{0}' was not present in the connection map.")]
    KeyNotFound(String),
    /// The container could not supply a collaborator
    #[error(transparent)]
    Require(#[from] RequireError),
}

impl RegistrationError {
    /// Name of the offending parameter, for argument errors
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            RegistrationError::NullArgument(name) | RegistrationError::OutOfRange(name) => {
                Some(name)
            }
            RegistrationError::KeyNotFound(_) | RegistrationError::Require(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_name_of_argument_errors() {
        assert_eq!(
            RegistrationError::NullArgument("services").param_name(),
            Some("services")
        );
        assert_eq!(
            RegistrationError::OutOfRange("connectionStringsKeyNamed").param_name(),
            Some("connectionStringsKeyNamed")
        );
        assert_eq!(RegistrationError::KeyNotFound("\"x\"".into()).param_name(), None);
    }

    #[test]
    fn messages_name_the_parameter() {
        let err = RegistrationError::NullArgument("connectionString");
        assert_eq!(
            err.to_string(),
            "Value cannot be null. (Parameter 'connectionString')"
        );
    }
}
