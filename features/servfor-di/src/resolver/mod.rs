use crate::{container::DiContainer, errors::RequireError};

pub mod arc;

/// Allows custom behaviour when pulling a dependency out of the container
pub trait Resolver {
    fn resolve(di: &DiContainer) -> Result<Self, RequireError>
    where
        Self: Sized;
}
