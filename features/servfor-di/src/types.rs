use std::{
    any::{Any, TypeId},
    sync::Arc,
};

/// Boxed error returned by factories
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Services are shared between threads once the container is built
/// So anything injectable needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// Shared instance held by the container
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub(crate) fn new<ExistingInstance: Injectable>(instance: ExistingInstance) -> Self {
        Instance {
            info: TypeInfo::of::<ExistingInstance>(),
            instance: Arc::new(instance),
        }
    }

    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.info.type_name),
        }
    }
}

/// How long a constructed service lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Registered already constructed
    Instance,
    /// Constructed on first use, then shared for the life of the container
    Singleton,
    /// Constructed on every resolve, never shared
    Transient,
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_to_stored_type() {
        let instance = Instance::new(42_u32);
        let value = instance.downcast::<u32>().unwrap();
        assert_eq!(*value, 42);
    }

    #[test]
    fn downcast_to_other_type_reports_actual() {
        let instance = Instance::new(String::from("x"));
        let err = instance.downcast::<u32>().unwrap_err();
        assert_eq!(err, std::any::type_name::<String>());
    }

    #[test]
    fn type_info_displays_name() {
        assert_eq!(TypeInfo::of::<u8>().to_string(), "u8");
    }
}
