use std::sync::Arc;

use thiserror::Error;

use crate::types::{DynError, Lifetime};

/// Errors when trying to require or resolve a certain type
#[derive(Error, Debug, Clone)]
pub enum RequireError {
    /// The required type is not known
    #[error("The required type '{0}' is not registered.")]
    TypeMissing(&'static str),

    /// The type is registered, but with a lifetime the call can't serve
    #[error("'{type_name}' is registered as {registered:?}, it can't be served as {requested:?}")]
    LifetimeMismatch {
        type_name: &'static str,
        registered: Lifetime,
        requested: Lifetime,
    },

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },

    /// A Factory failed to build
    #[error("Factory for '{product}' failed - error: {error}")]
    FactoryFailed {
        product: &'static str,
        error: Arc<DynError>,
    },

    /// A singleton was required again while its own factory was running
    #[error("Circular dependency - '{type_name}' was required while it was being constructed")]
    CircularDependency { type_name: &'static str },
}

impl RequireError {
    /// Wraps a factory's error, a circular dependency is passed through as is
    pub(crate) fn factory_failed(product: &'static str, error: DynError) -> Self {
        match error.downcast::<RequireError>() {
            Ok(inner) if matches!(*inner, RequireError::CircularDependency { .. }) => *inner,
            Ok(inner) => RequireError::FactoryFailed {
                product,
                error: Arc::new(inner as DynError),
            },
            Err(error) => RequireError::FactoryFailed {
                product,
                error: Arc::new(error),
            },
        }
    }
}
