//! The service collection the resolver adapter delegates to.
//!
//! A [`ServiceCollection`] is an ordered list of [`ServiceDescriptor`]s. It knows nothing about
//! contracts; it indexes by type only. Providers are built from it on demand with
//! [`ServiceCollection::build_service_provider`].

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{ServiceKey, ServiceProvider};

/// A resolved, type-erased service instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A type-erased factory producing service instances.
pub type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

static NEXT_DESCRIPTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a descriptor, used for remove-by-identity.
///
/// Ids are unique for the lifetime of the process, so two descriptors describing the same
/// service and implementation are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u64);

impl DescriptorId {
    fn next() -> Self {
        Self(NEXT_DESCRIPTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How long a resolved instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// One instance shared by every provider.
    Singleton,
    /// One instance per built provider.
    Scoped,
    /// A fresh instance on every resolution.
    Transient,
}

#[derive(Clone)]
enum ServiceSource {
    Instance(Instance),
    Factory(Factory),
}

/// A registration: the declared service type, its implementation type, a lifetime and
/// either a ready instance or a factory.
#[derive(Clone)]
pub struct ServiceDescriptor {
    id: DescriptorId,
    service: ServiceKey,
    implementation: TypeId,
    lifetime: Lifetime,
    source: ServiceSource,
}

impl ServiceDescriptor {
    /// Singleton descriptor around an existing instance.
    ///
    /// The implementation type is the concrete runtime type of `instance`.
    pub fn from_instance(service: ServiceKey, instance: Instance) -> Self {
        Self {
            id: DescriptorId::next(),
            service,
            implementation: Any::type_id(&*instance),
            lifetime: Lifetime::Singleton,
            source: ServiceSource::Instance(instance),
        }
    }

    /// Descriptor around a factory.
    ///
    /// A factory is opaque until it runs, so the implementation type is the service type.
    pub fn from_factory(service: ServiceKey, lifetime: Lifetime, factory: Factory) -> Self {
        Self {
            id: DescriptorId::next(),
            service,
            implementation: service.type_id(),
            lifetime,
            source: ServiceSource::Factory(factory),
        }
    }

    pub fn singleton<S: Send + Sync + 'static>(value: S) -> Self {
        Self::from_instance(ServiceKey::of::<S>(), Arc::new(value))
    }

    pub fn scoped<S, F>(factory: F) -> Self
    where
        S: Send + Sync + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self::from_factory(ServiceKey::of::<S>(), Lifetime::Scoped, erase(factory))
    }

    pub fn transient<S, F>(factory: F) -> Self
    where
        S: Send + Sync + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self::from_factory(ServiceKey::of::<S>(), Lifetime::Transient, erase(factory))
    }

    pub fn id(&self) -> DescriptorId {
        self.id
    }

    /// The declared service type.
    pub fn service_type(&self) -> ServiceKey {
        self.service
    }

    pub fn implementation_type(&self) -> TypeId {
        self.implementation
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Returns the stored instance, or runs the factory.
    ///
    /// Caching of scoped and factory-backed singletons is the provider's job.
    pub(crate) fn create(&self) -> Instance {
        match &self.source {
            ServiceSource::Instance(instance) => Arc::clone(instance),
            ServiceSource::Factory(factory) => factory(),
        }
    }

    pub(crate) fn has_instance(&self) -> bool {
        matches!(self.source, ServiceSource::Instance(_))
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("id", &self.id)
            .field("service", &self.service.type_name())
            .field("lifetime", &self.lifetime)
            .field("has_instance", &self.has_instance())
            .finish()
    }
}

/// Wraps a typed factory into a type-erased [`Factory`].
pub fn erase<S, F>(factory: F) -> Factory
where
    S: Send + Sync + 'static,
    F: Fn() -> S + Send + Sync + 'static,
{
    Arc::new(move || Arc::new(factory()) as Instance)
}

/// Ordered list of service registrations.
///
/// Several descriptors may share a service type; the last one added wins for single
/// resolution and all of them are returned for multi resolution.
///
/// # Examples
///
/// ```rust
/// use locator_adapter::ServiceCollection;
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(42u32).add_scoped(|| "scoped".to_string());
///
/// let provider = services.build_service_provider();
/// let number = provider.get::<u32>().unwrap();
/// assert_eq!(*number, 42);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor and returns its id.
    pub fn add(&mut self, descriptor: ServiceDescriptor) -> DescriptorId {
        let id = descriptor.id();
        self.descriptors.push(descriptor);
        id
    }

    pub fn add_singleton<S: Send + Sync + 'static>(&mut self, value: S) -> &mut Self {
        self.add(ServiceDescriptor::singleton(value));
        self
    }

    pub fn add_scoped<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: Send + Sync + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::scoped(factory));
        self
    }

    pub fn add_transient<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: Send + Sync + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::transient(factory));
        self
    }

    /// Removes the descriptor with the given id. Returns `true` if one was removed.
    pub fn remove(&mut self, id: DescriptorId) -> bool {
        match self.descriptors.iter().position(|d| d.id() == id) {
            Some(index) => {
                self.descriptors.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every descriptor matching `predicate`, returning them in registration order.
    pub fn remove_where(
        &mut self,
        mut predicate: impl FnMut(&ServiceDescriptor) -> bool,
    ) -> Vec<ServiceDescriptor> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.descriptors.len());
        for descriptor in self.descriptors.drain(..) {
            if predicate(&descriptor) {
                removed.push(descriptor);
            } else {
                kept.push(descriptor);
            }
        }
        self.descriptors = kept;
        removed
    }

    pub fn contains(&self, id: DescriptorId) -> bool {
        self.descriptors.iter().any(|d| d.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Builds a provider from a snapshot of the current registrations.
    pub fn build_service_provider(&self) -> ServiceProvider {
        ServiceProvider::new(self.descriptors.iter().cloned())
    }

    /// Moves the collection behind a shared handle.
    pub fn into_shared(self) -> SharedServiceCollection {
        SharedServiceCollection(Arc::new(Mutex::new(self)))
    }
}

impl<'a> IntoIterator for &'a ServiceCollection {
    type Item = &'a ServiceDescriptor;
    type IntoIter = std::slice::Iter<'a, ServiceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

/// A [`ServiceCollection`] shared between its owner and a resolver.
///
/// Cloning the handle shares the same collection.
#[derive(Debug, Clone, Default)]
pub struct SharedServiceCollection(Arc<Mutex<ServiceCollection>>);

impl SharedServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the collection.
    ///
    /// A poisoned lock is recovered: the collection is plain data and stays consistent
    /// between individual operations.
    pub fn lock(&self) -> MutexGuard<'_, ServiceCollection> {
        self.0.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl From<ServiceCollection> for SharedServiceCollection {
    fn from(collection: ServiceCollection) -> Self {
        collection.into_shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_ids_are_unique() {
        let a = ServiceDescriptor::singleton(1u8);
        let b = ServiceDescriptor::singleton(1u8);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_instance_descriptor_reports_runtime_type() {
        let instance: Instance = Arc::new(7u16);
        let descriptor = ServiceDescriptor::from_instance(ServiceKey::of::<u64>(), instance);

        assert_eq!(descriptor.service_type(), ServiceKey::of::<u64>());
        assert_eq!(descriptor.implementation_type(), TypeId::of::<u16>());
        assert_eq!(descriptor.lifetime(), Lifetime::Singleton);
    }

    #[test]
    fn test_factory_descriptor_uses_service_type() {
        let descriptor = ServiceDescriptor::transient(|| 3i32);
        assert_eq!(descriptor.implementation_type(), TypeId::of::<i32>());
        assert_eq!(descriptor.lifetime(), Lifetime::Transient);
        assert!(!descriptor.has_instance());
    }

    #[test]
    fn test_remove_by_identity() {
        let mut services = ServiceCollection::new();
        let first = services.add(ServiceDescriptor::singleton(1u8));
        let second = services.add(ServiceDescriptor::singleton(1u8));

        assert!(services.remove(first));
        assert!(!services.remove(first));
        assert!(!services.contains(first));
        assert!(services.contains(second));
        assert_eq!(services.len(), 1);
    }

    #[test]
    fn test_remove_where_keeps_order() {
        let mut services = ServiceCollection::new();
        services
            .add_singleton(1u8)
            .add_singleton("a".to_string())
            .add_singleton(2u8)
            .add_singleton("b".to_string());

        let removed = services.remove_where(|d| d.service_type() == ServiceKey::of::<u8>());
        assert_eq!(removed.len(), 2);

        let remaining: Vec<_> = services.iter().map(|d| d.create()).collect();
        let remaining: Vec<String> = remaining
            .into_iter()
            .map(|i| i.downcast::<String>().unwrap().as_ref().clone())
            .collect();
        assert_eq!(remaining, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_descriptor_id_display() {
        let mut services = ServiceCollection::new();
        let id = services.add(ServiceDescriptor::singleton(1u8));
        assert_eq!(id.to_string(), format!("#{}", id.0));
    }

    #[test]
    fn test_shared_handle_sees_changes() {
        let shared = SharedServiceCollection::from(ServiceCollection::new());
        let other = shared.clone();

        other.lock().add_singleton(5u32);
        assert_eq!(shared.lock().len(), 1);
        assert!(!shared.lock().is_empty());
    }

    #[test]
    fn test_debug_format_hides_instances() {
        let descriptor = ServiceDescriptor::singleton(1u8);
        let text = format!("{:?}", descriptor);
        assert!(text.contains("ServiceDescriptor"));
        assert!(text.contains("u8"));
        assert!(text.contains("has_instance: true"));
    }
}
