//! Core traits defining resolver behavior.
//!
//! [`DependencyResolver`] and [`MutableDependencyResolver`] are object safe and work on
//! type-erased [`Instance`]s keyed by [`ServiceKey`] plus an optional contract string.
//! The generic conveniences live in the blanket-implemented extension traits
//! [`DependencyResolverExt`] and [`MutableDependencyResolverExt`].

use std::fmt;
use std::sync::Arc;

use crate::service_collection::erase;
use crate::{Factory, Instance, ResolverError, Result, ServiceKey};

/// Callback invoked for registrations made after it was installed.
pub type RegistrationCallback = Box<dyn FnMut(&CallbackSubscription) + Send + 'static>;

/// Handle returned by a successful `service_registration_callback`.
///
/// Disposing it stops further notifications.
pub struct CallbackSubscription {
    on_dispose: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl CallbackSubscription {
    pub fn new(on_dispose: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_dispose: Some(Box::new(on_dispose)),
        }
    }

    pub fn dispose(mut self) {
        if let Some(on_dispose) = self.on_dispose.take() {
            on_dispose();
        }
    }
}

impl fmt::Debug for CallbackSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSubscription")
            .field("disposed", &self.on_dispose.is_none())
            .finish()
    }
}

/// Read side of a locator.
///
/// A miss is never an error: `get_service` returns `Ok(None)` and `get_services` an empty
/// vector. Errors describe the resolver itself, e.g. use after [`dispose`](Self::dispose).
pub trait DependencyResolver: Send + Sync {
    /// Resolve one instance of `service`, optionally qualified by `contract`.
    fn get_service(&self, service: &ServiceKey, contract: Option<&str>) -> Result<Option<Instance>>;

    /// Resolve every instance of `service`, optionally qualified by `contract`.
    fn get_services(&self, service: &ServiceKey, contract: Option<&str>) -> Result<Vec<Instance>>;

    /// Release the resolver's resources. Calling it again has no effect.
    fn dispose(&self);
}

/// Write side of a locator.
pub trait MutableDependencyResolver: DependencyResolver {
    /// Register `factory` for `service`, optionally under `contract`.
    fn register(&self, factory: Factory, service: ServiceKey, contract: Option<&str>) -> Result<()>;

    /// Remove the current registration for `service` / `contract`.
    fn unregister_current(&self, service: &ServiceKey, contract: Option<&str>) -> Result<()>;

    /// Remove every registration for `service` / `contract`.
    fn unregister_all(&self, service: &ServiceKey, contract: Option<&str>) -> Result<()>;

    /// Get notified of future registrations for `service` / `contract`.
    ///
    /// Implementations that cannot observe registrations return
    /// [`ResolverError::NotSupported`].
    fn service_registration_callback(
        &self,
        service: &ServiceKey,
        contract: Option<&str>,
        callback: RegistrationCallback,
    ) -> Result<CallbackSubscription>;
}

fn downcast<T: Send + Sync + 'static>(instance: Instance) -> Result<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| ResolverError::TypeMismatch {
            type_name: std::any::type_name::<T>(),
        })
}

/// Typed resolution on top of [`DependencyResolver`].
///
/// # Examples
///
/// ```rust
/// use locator_adapter::{
///     DependencyResolverExt, MutableDependencyResolverExt, ServiceCollection,
///     ServiceCollectionResolver,
/// };
///
/// let resolver = ServiceCollectionResolver::new(ServiceCollection::new().into_shared());
/// resolver.register_fn(|| 42u32).unwrap();
///
/// let value = resolver.get::<u32>().unwrap().unwrap();
/// assert_eq!(*value, 42);
/// assert!(resolver.get::<u64>().unwrap().is_none());
/// ```
pub trait DependencyResolverExt: DependencyResolver {
    /// # Errors
    ///
    /// - The resolver is disposed
    /// - The stored instance is not a `T`
    fn get<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        self.get_service(&ServiceKey::of::<T>(), None)?
            .map(downcast::<T>)
            .transpose()
    }

    fn get_named<T: Send + Sync + 'static>(&self, contract: &str) -> Result<Option<Arc<T>>> {
        self.get_service(&ServiceKey::of::<T>(), Some(contract))?
            .map(downcast::<T>)
            .transpose()
    }

    fn get_all<T: Send + Sync + 'static>(&self) -> Result<Vec<Arc<T>>> {
        self.get_services(&ServiceKey::of::<T>(), None)?
            .into_iter()
            .map(downcast::<T>)
            .collect()
    }

    fn get_all_named<T: Send + Sync + 'static>(&self, contract: &str) -> Result<Vec<Arc<T>>> {
        self.get_services(&ServiceKey::of::<T>(), Some(contract))?
            .into_iter()
            .map(downcast::<T>)
            .collect()
    }
}

impl<R: DependencyResolver + ?Sized> DependencyResolverExt for R {}

/// Typed registration on top of [`MutableDependencyResolver`].
pub trait MutableDependencyResolverExt: MutableDependencyResolver {
    fn register_fn<T, F>(&self, factory: F) -> Result<()>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(erase(factory), ServiceKey::of::<T>(), None)
    }

    fn register_named_fn<T, F>(&self, factory: F, contract: &str) -> Result<()>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(erase(factory), ServiceKey::of::<T>(), Some(contract))
    }

    /// Register a value that every resolution returns as the same `Arc`.
    fn register_constant<T: Send + Sync + 'static>(&self, value: T) -> Result<()> {
        self.register(constant(value), ServiceKey::of::<T>(), None)
    }

    fn register_named_constant<T: Send + Sync + 'static>(
        &self,
        value: T,
        contract: &str,
    ) -> Result<()> {
        self.register(constant(value), ServiceKey::of::<T>(), Some(contract))
    }

    fn unregister_current_of<T: ?Sized + 'static>(&self, contract: Option<&str>) -> Result<()> {
        self.unregister_current(&ServiceKey::of::<T>(), contract)
    }

    fn unregister_all_of<T: ?Sized + 'static>(&self, contract: Option<&str>) -> Result<()> {
        self.unregister_all(&ServiceKey::of::<T>(), contract)
    }
}

impl<R: MutableDependencyResolver + ?Sized> MutableDependencyResolverExt for R {}

fn constant<T: Send + Sync + 'static>(value: T) -> Factory {
    let instance: Instance = Arc::new(value);
    Arc::new(move || Arc::clone(&instance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_subscription_dispose_runs_once() {
        static DISPOSED: AtomicBool = AtomicBool::new(false);

        let subscription = CallbackSubscription::new(|| DISPOSED.store(true, Ordering::SeqCst));
        assert!(format!("{:?}", subscription).contains("disposed: false"));

        subscription.dispose();
        assert!(DISPOSED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_downcast_mismatch() {
        let instance: Instance = Arc::new(1u8);
        let err = downcast::<String>(instance).unwrap_err();
        assert_eq!(
            err,
            ResolverError::TypeMismatch {
                type_name: "alloc::string::String"
            }
        );
    }

    #[test]
    fn test_constant_factory_shares_instance() {
        let factory = constant("same".to_string());
        let a = factory();
        let b = factory();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
