//! Process-wide locator slot.
//!
//! Prefer passing an `Arc<dyn MutableDependencyResolver>` to the code that needs it. The
//! slot exists for call sites that expect an ambient locator; it holds at most one resolver.
//!
//! # Examples
//!
//! ```rust
//! use locator_adapter::{locator, DependencyResolverExt, ServiceCollection, ServiceCollectionExt};
//!
//! let services = ServiceCollection::new().into_shared();
//! services.lock().add_singleton(7u32);
//! services.use_dependency_resolver();
//!
//! let value = locator::current().unwrap().get::<u32>().unwrap().unwrap();
//! assert_eq!(*value, 7);
//! # locator::clear_current();
//! ```

use std::sync::{Arc, LazyLock, RwLock};

use tracing::debug;

use crate::{
    MutableDependencyResolver, ResolverError, ResolverOptions, Result, ServiceCollectionResolver,
    SharedServiceCollection,
};

/// The installed resolver, if any.
static CURRENT: LazyLock<RwLock<Option<Arc<dyn MutableDependencyResolver>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Installs `resolver` as the current locator and returns the one it replaced.
///
/// The replaced resolver is not disposed; whoever still holds it decides.
pub fn set_current(
    resolver: Arc<dyn MutableDependencyResolver>,
) -> Option<Arc<dyn MutableDependencyResolver>> {
    debug!("installing current resolver");
    CURRENT
        .write()
        .unwrap_or_else(|p| p.into_inner())
        .replace(resolver)
}

/// Returns the current locator.
///
/// # Errors
///
/// - No resolver has been installed
pub fn current() -> Result<Arc<dyn MutableDependencyResolver>> {
    CURRENT
        .read()
        .unwrap_or_else(|p| p.into_inner())
        .clone()
        .ok_or(ResolverError::NoCurrentResolver)
}

/// Removes the current locator, returning it.
pub fn clear_current() -> Option<Arc<dyn MutableDependencyResolver>> {
    CURRENT.write().unwrap_or_else(|p| p.into_inner()).take()
}

/// Installs a [`ServiceCollectionResolver`] over a collection as the current locator.
pub trait ServiceCollectionExt {
    /// Installs a resolver with default options and returns it.
    fn use_dependency_resolver(&self) -> Arc<ServiceCollectionResolver> {
        self.use_dependency_resolver_with(ResolverOptions::default())
    }

    fn use_dependency_resolver_with(
        &self,
        options: ResolverOptions,
    ) -> Arc<ServiceCollectionResolver>;
}

impl ServiceCollectionExt for SharedServiceCollection {
    fn use_dependency_resolver_with(
        &self,
        options: ResolverOptions,
    ) -> Arc<ServiceCollectionResolver> {
        let resolver = Arc::new(ServiceCollectionResolver::with_options(self.clone(), options));
        set_current(resolver.clone());
        resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DependencyResolverExt, MutableDependencyResolverExt, ServiceCollection};
    use serial_test::serial;

    impl std::fmt::Debug for dyn MutableDependencyResolver {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("dyn MutableDependencyResolver")
        }
    }

    #[test]
    #[serial]
    fn test_current_unset() {
        clear_current();
        assert_eq!(current().unwrap_err(), ResolverError::NoCurrentResolver);
    }

    #[test]
    #[serial]
    fn test_set_current_returns_previous() {
        clear_current();

        let first = Arc::new(ServiceCollectionResolver::new(SharedServiceCollection::new()));
        let second = Arc::new(ServiceCollectionResolver::new(SharedServiceCollection::new()));

        assert!(set_current(first.clone()).is_none());
        let previous = set_current(second).expect("first resolver");
        assert!(!first.is_disposed());

        first.register_fn(|| 1u8).unwrap();
        assert_eq!(*previous.get::<u8>().unwrap().unwrap(), 1);

        assert!(clear_current().is_some());
        assert!(clear_current().is_none());
    }

    #[test]
    #[serial]
    fn test_use_dependency_resolver_installs() {
        clear_current();

        let services = ServiceCollection::new().into_shared();
        let resolver = services.use_dependency_resolver();

        current().unwrap().register_fn(|| "ambient".to_string()).unwrap();
        let value = resolver.get::<String>().unwrap().unwrap();
        assert_eq!(&*value, "ambient");
        assert_eq!(services.lock().len(), 1);

        clear_current();
    }
}
