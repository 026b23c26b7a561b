use std::{any::TypeId, collections::HashMap, fmt::Debug};

use crate::{
    container::DiContainer,
    factories::DynFactory,
    types::{DynError, Injectable, Instance, Lifetime, TypeInfo},
};

//////////////////////////////////////////////////////////////////////
//
// The DI Consists of two Parts.
// 1. The DiBuilder where one registers all factories and instances
// 2. The DiContainer built from it, which serves them

/// A single registration, keyed by the TypeId of what it provides
pub(crate) enum Registration {
    /// Already created instance
    Instance(Instance),
    /// Factory called once, on first require
    Singleton(Box<dyn DynFactory>),
    /// Factory called on every resolve
    Transient(Box<dyn DynFactory>),
}

impl Registration {
    pub(crate) fn info(&self) -> TypeInfo {
        match self {
            Registration::Instance(instance) => instance.info,
            Registration::Singleton(factory) | Registration::Transient(factory) => {
                factory.supplies()
            }
        }
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        match self {
            Registration::Instance(_) => Lifetime::Instance,
            Registration::Singleton(_) => Lifetime::Singleton,
            Registration::Transient(_) => Lifetime::Transient,
        }
    }
}

pub struct DiBuilder {
    /// Registered instances and factories
    pub(crate) registrations: HashMap<TypeId, Registration>,
}
impl Default for DiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for DiBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("DiBuilder");
        for registration in self.registrations.values() {
            map.field(registration.info().type_name, &registration.lifetime());
        }
        map.finish()
    }
}

impl DiBuilder {
    pub fn new() -> Self {
        DiBuilder {
            registrations: HashMap::new(),
        }
    }

    /// Returns true if anything providing `T` is registered
    pub fn contains<T: Injectable>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    /// Returns the lifetime `T` is registered with, if it is registered
    pub fn lifetime_of<T: Injectable>(&self) -> Option<Lifetime> {
        self.registrations
            .get(&TypeId::of::<T>())
            .map(Registration::lifetime)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl DiBuilder {
    /// Registers an existing instance, replacing any earlier registration of `T`
    pub fn add_instance<T: Injectable>(&mut self, instance: T) -> &mut Self {
        self.insert(TypeId::of::<T>(), Registration::Instance(Instance::new(instance)))
    }

    /// Registers an existing instance unless `T` is already registered
    pub fn try_add_instance<T: Injectable>(&mut self, instance: T) -> &mut Self {
        if self.skip_existing::<T>(Lifetime::Instance) {
            return self;
        }
        self.add_instance(instance)
    }

    /// Registers a factory which is called once, the first time `T` is required
    pub fn add_singleton<T, E, F>(&mut self, factory: F) -> &mut Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(&DiContainer) -> Result<T, E> + Send + Sync + 'static,
    {
        self.insert(TypeId::of::<T>(), Registration::Singleton(Box::new(factory)))
    }

    /// Registers a singleton factory unless `T` is already registered
    pub fn try_add_singleton<T, E, F>(&mut self, factory: F) -> &mut Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(&DiContainer) -> Result<T, E> + Send + Sync + 'static,
    {
        if self.skip_existing::<T>(Lifetime::Singleton) {
            return self;
        }
        self.add_singleton(factory)
    }

    /// Registers a factory which is called every time `T` is resolved
    pub fn add_transient<T, E, F>(&mut self, factory: F) -> &mut Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(&DiContainer) -> Result<T, E> + Send + Sync + 'static,
    {
        self.insert(TypeId::of::<T>(), Registration::Transient(Box::new(factory)))
    }

    /// Registers a transient factory unless `T` is already registered
    pub fn try_add_transient<T, E, F>(&mut self, factory: F) -> &mut Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(&DiContainer) -> Result<T, E> + Send + Sync + 'static,
    {
        if self.skip_existing::<T>(Lifetime::Transient) {
            return self;
        }
        self.add_transient(factory)
    }

    /// Builds the container, no factory is called yet
    pub fn build(self) -> DiContainer {
        tracing::debug!(
            "Building container with {} registrations",
            self.registrations.len()
        );
        DiContainer::new(self.registrations)
    }

    fn insert(&mut self, type_id: TypeId, registration: Registration) -> &mut Self {
        let info = registration.info();
        if let Some(replaced) = self.registrations.insert(type_id, registration) {
            tracing::debug!(
                "Replaced {:?} registration of {} with {:?}",
                replaced.lifetime(),
                info,
                self.registrations[&type_id].lifetime()
            );
        }
        self
    }

    fn skip_existing<T: Injectable>(&self, lifetime: Lifetime) -> bool {
        let exists = self.contains::<T>();
        if exists {
            tracing::debug!(
                "{} is already registered - skipping {:?} registration",
                TypeInfo::of::<T>(),
                lifetime
            );
        }
        exists
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    #[test]
    fn add_instance_registers_type() {
        let mut builder = DiBuilder::new();
        builder.add_instance(5_u32);

        assert!(builder.contains::<u32>());
        assert_eq!(builder.lifetime_of::<u32>(), Some(Lifetime::Instance));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn try_add_keeps_first_registration() {
        let mut builder = DiBuilder::new();
        builder
            .try_add_singleton(|_| Ok::<_, Infallible>(1_u32))
            .try_add_transient(|_| Ok::<_, Infallible>(2_u32))
            .try_add_instance(3_u32);

        assert_eq!(builder.lifetime_of::<u32>(), Some(Lifetime::Singleton));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn add_replaces_registration() {
        let mut builder = DiBuilder::new();
        builder
            .add_singleton(|_| Ok::<_, Infallible>(1_u32))
            .add_transient(|_| Ok::<_, Infallible>(2_u32));

        assert_eq!(builder.lifetime_of::<u32>(), Some(Lifetime::Transient));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn empty_builder() {
        let builder = DiBuilder::default();
        assert!(builder.is_empty());
        assert_eq!(builder.lifetime_of::<u32>(), None);
    }
}
