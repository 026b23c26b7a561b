use std::{
    any::{type_name, TypeId},
    cell::RefCell,
    collections::{HashMap, HashSet},
    fmt::Debug,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use crate::{
    builder::Registration,
    errors::RequireError,
    factories::DynFactory,
    resolver::Resolver,
    types::{Injectable, Instance, Lifetime, TypeInfo},
};

/// Container holding all registered services
///
/// Cloning is cheap, all clones share the same singletons.
#[derive(Clone)]
pub struct DiContainer(pub Arc<DiContainerInner>);
pub struct DiContainerInner {
    services: HashMap<TypeId, ServiceSlot>,
}

enum ServiceSlot {
    Ready(Instance),
    Lazy(LazySingleton),
    Transient(Box<dyn DynFactory>),
}

struct LazySingleton {
    factory: Box<dyn DynFactory>,
    once: OnceLock<Instance>,
    /// Serializes construction, so the factory runs once even on concurrent first require
    init: Mutex<()>,
}

thread_local! {
    /// Singletons the current thread is constructing, keyed by container and type
    static CONSTRUCTING: RefCell<HashSet<(usize, TypeId)>> = RefCell::new(HashSet::new());
}

/// Marks a singleton as under construction on this thread until dropped
struct ConstructionGuard {
    key: (usize, TypeId),
}

impl ConstructionGuard {
    /// Returns None if this thread is already constructing `key`
    fn enter(key: (usize, TypeId)) -> Option<Self> {
        let entered = CONSTRUCTING.with(|constructing| constructing.borrow_mut().insert(key));
        entered.then_some(ConstructionGuard { key })
    }
}

impl Drop for ConstructionGuard {
    fn drop(&mut self) {
        let _ = CONSTRUCTING.try_with(|constructing| constructing.borrow_mut().remove(&self.key));
    }
}

impl ServiceSlot {
    fn info(&self) -> TypeInfo {
        match self {
            ServiceSlot::Ready(instance) => instance.info,
            ServiceSlot::Lazy(lazy) => lazy.factory.supplies(),
            ServiceSlot::Transient(factory) => factory.supplies(),
        }
    }

    fn lifetime(&self) -> Lifetime {
        match self {
            ServiceSlot::Ready(_) => Lifetime::Instance,
            ServiceSlot::Lazy(_) => Lifetime::Singleton,
            ServiceSlot::Transient(_) => Lifetime::Transient,
        }
    }
}

impl From<Registration> for ServiceSlot {
    fn from(registration: Registration) -> Self {
        match registration {
            Registration::Instance(instance) => ServiceSlot::Ready(instance),
            Registration::Singleton(factory) => ServiceSlot::Lazy(LazySingleton {
                factory,
                once: OnceLock::new(),
                init: Mutex::new(()),
            }),
            Registration::Transient(factory) => ServiceSlot::Transient(factory),
        }
    }
}

impl Debug for DiContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("DiContainer");
        for slot in self.0.services.values() {
            let val = match slot {
                ServiceSlot::Ready(_) => "instance",
                ServiceSlot::Lazy(lazy) if lazy.once.get().is_some() => "singleton (constructed)",
                ServiceSlot::Lazy(_) => "singleton",
                ServiceSlot::Transient(_) => "transient",
            };
            map.field(slot.info().type_name, &val);
        }
        map.finish()
    }
}

impl DiContainer {
    pub(crate) fn new(registrations: HashMap<TypeId, Registration>) -> Self {
        let services = registrations
            .into_iter()
            .map(|(type_id, registration)| (type_id, registration.into()))
            .collect();
        Self(Arc::new(DiContainerInner { services }))
    }

    /// Returns true if anything providing `T` is registered
    pub fn contains<T: Injectable>(&self) -> bool {
        self.0.services.contains_key(&TypeId::of::<T>())
    }

    /// Returns the lifetime `T` is registered with, if it is registered
    pub fn lifetime_of<T: Injectable>(&self) -> Option<Lifetime> {
        self.0
            .services
            .get(&TypeId::of::<T>())
            .map(ServiceSlot::lifetime)
    }

    /// Gets the shared instance of `T`
    ///
    /// Works for registered instances and singletons. A singleton is constructed
    /// on its first require, a failed construction is not cached.
    pub fn require<T: Injectable>(&self) -> Result<Arc<T>, RequireError> {
        let instance = match self.slot::<T>()? {
            ServiceSlot::Ready(instance) => instance,
            ServiceSlot::Lazy(lazy) => self.get_or_construct(lazy)?,
            ServiceSlot::Transient(_) => {
                return Err(RequireError::LifetimeMismatch {
                    type_name: type_name::<T>(),
                    registered: Lifetime::Transient,
                    requested: Lifetime::Singleton,
                })
            }
        };

        instance
            .downcast()
            .map_err(|actual_type| RequireError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            })
    }

    /// Constructs a new `T` from its transient factory
    pub fn resolve<T: Injectable>(&self) -> Result<T, RequireError> {
        let factory = match self.slot::<T>()? {
            ServiceSlot::Transient(factory) => factory,
            slot => {
                return Err(RequireError::LifetimeMismatch {
                    type_name: type_name::<T>(),
                    registered: slot.lifetime(),
                    requested: Lifetime::Transient,
                })
            }
        };

        let product = factory
            .construct_owned(self)
            .map_err(|error| RequireError::factory_failed(type_name::<T>(), error))?;

        product
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| RequireError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type: factory.supplies().type_name,
            })
    }

    /// Resolves anything implementing [Resolver], e.g. `Arc<T>` or `Option<Arc<T>>`
    pub fn get<R: Resolver>(&self) -> Result<R, RequireError> {
        R::resolve(self)
    }

    fn slot<T: Injectable>(&self) -> Result<&ServiceSlot, RequireError> {
        match self.0.services.get(&TypeId::of::<T>()) {
            Some(slot) => Ok(slot),
            None => {
                tracing::error!("Tried to require an unregistered type: {}", type_name::<T>());
                Err(RequireError::TypeMissing(type_name::<T>()))
            }
        }
    }

    fn get_or_construct<'a>(&self, lazy: &'a LazySingleton) -> Result<&'a Instance, RequireError> {
        if let Some(instance) = lazy.once.get() {
            return Ok(instance);
        }

        let info = lazy.factory.supplies();

        // Required again from its own factory on this thread
        let key = (Arc::as_ptr(&self.0) as usize, info.type_id);
        let Some(_constructing) = ConstructionGuard::enter(key) else {
            tracing::error!("Circular dependency while constructing {}", info.type_name);
            return Err(RequireError::CircularDependency {
                type_name: info.type_name,
            });
        };

        // Lock init, so only one caller constructs
        let _guard = lazy.init.lock().unwrap_or_else(PoisonError::into_inner);

        // Double check once - it might have been set while we waited for the lock
        if let Some(instance) = lazy.once.get() {
            return Ok(instance);
        }

        let instance = lazy
            .factory
            .construct_shared(self)
            .map_err(|error| RequireError::factory_failed(info.type_name, error))?;

        tracing::debug!("Constructed singleton of {}", info.type_name);
        Ok(lazy.once.get_or_init(|| instance))
    }
}
