use std::any::Any;

use crate::{
    container::DiContainer,
    types::{DynError, Injectable, Instance, TypeInfo},
};

/// A Factory providing instances of a given type
///
/// Implemented for any `Fn(&DiContainer) -> Result<T, E>`, so closures can be
/// registered directly on the [DiBuilder](crate::builder::DiBuilder).
pub trait InstanceFactory: Send + Sync + 'static {
    type Provides: Injectable;

    /// Returns the typeinfo about the factory's provided type
    fn supplies() -> TypeInfo {
        TypeInfo::of::<Self::Provides>()
    }

    /// Constructs a new instance of the factory's provided type
    ///
    /// Dependencies are pulled from `di`. Returns an error if they are not
    /// satisfied or the construction itself failed.
    fn construct(&self, di: &DiContainer) -> Result<Self::Provides, DynError>;
}

impl<T, E, F> InstanceFactory for F
where
    T: Injectable,
    E: Into<DynError>,
    F: Fn(&DiContainer) -> Result<T, E> + Send + Sync + 'static,
{
    type Provides = T;

    fn construct(&self, di: &DiContainer) -> Result<T, DynError> {
        self(di).map_err(Into::into)
    }
}

/// Wrapper Trait for factories, providing instances of Any
pub(crate) trait DynFactory: Send + Sync {
    fn supplies(&self) -> TypeInfo;

    /// Constructs an instance meant to be shared by the container
    fn construct_shared(&self, di: &DiContainer) -> Result<Instance, DynError>;

    /// Constructs an instance handed out by value
    fn construct_owned(&self, di: &DiContainer) -> Result<Box<dyn Any + Send>, DynError>;
}

// Impl DynFactory for any InstanceFactory
impl<SpecificFactory: InstanceFactory> DynFactory for SpecificFactory {
    fn supplies(&self) -> TypeInfo {
        SpecificFactory::supplies()
    }

    fn construct_shared(&self, di: &DiContainer) -> Result<Instance, DynError> {
        SpecificFactory::construct(self, di).map(Instance::new)
    }

    fn construct_owned(&self, di: &DiContainer) -> Result<Box<dyn Any + Send>, DynError> {
        SpecificFactory::construct(self, di).map(|product| Box::new(product) as Box<dyn Any + Send>)
    }
}
