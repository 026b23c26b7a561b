use std::sync::Arc;

use crate::{
    container::DiContainer, errors::RequireError, resolver::Resolver, types::Injectable,
};

impl<T: Injectable> Resolver for Arc<T> {
    fn resolve(di: &DiContainer) -> Result<Self, RequireError> {
        di.require::<T>()
    }
}

impl<Resolvable: Resolver> Resolver for Option<Resolvable> {
    fn resolve(di: &DiContainer) -> Result<Self, RequireError>
    where
        Self: Sized,
    {
        match Resolvable::resolve(di) {
            Ok(resolved) => Ok(Some(resolved)),
            // If the required type is not registered Option does not fail
            Err(RequireError::TypeMissing(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DiBuilder;

    #[test]
    fn arc_resolves_registered_instance() {
        let mut builder = DiBuilder::new();
        builder.add_instance(7_i64);
        let container = builder.build();

        let value: Arc<i64> = container.get().unwrap();
        assert_eq!(*value, 7);
    }

    #[test]
    fn option_is_none_for_missing_type() {
        let container = DiBuilder::new().build();

        let value: Option<Arc<i64>> = container.get().unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn option_forwards_other_errors() {
        let mut builder = DiBuilder::new();
        builder.add_singleton(|_| Err::<i64, _>("broken"));
        let container = builder.build();

        let result: Result<Option<Arc<i64>>, _> = container.get();
        assert!(matches!(result, Err(RequireError::FactoryFailed { .. })));
    }
}
