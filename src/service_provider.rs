//! Resolution provider built from a [`ServiceCollection`](crate::ServiceCollection).

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{DescriptorId, Instance, Lifetime, ServiceDescriptor, ServiceKey};

/// A queryable snapshot of a service collection.
///
/// Registrations added to the collection after the provider was built are not visible;
/// build a new provider to observe them. Scoped instances, and singletons created by a
/// factory, are created once per provider.
pub struct ServiceProvider {
    by_type: HashMap<TypeId, Vec<ServiceDescriptor>>,
    by_id: HashMap<DescriptorId, ServiceDescriptor>,
    cache: Mutex<HashMap<DescriptorId, Instance>>,
}

impl ServiceProvider {
    pub(crate) fn new(descriptors: impl IntoIterator<Item = ServiceDescriptor>) -> Self {
        let mut by_type: HashMap<TypeId, Vec<ServiceDescriptor>> = HashMap::new();
        let mut by_id = HashMap::new();

        for descriptor in descriptors {
            by_id.insert(descriptor.id(), descriptor.clone());
            by_type
                .entry(descriptor.service_type().type_id())
                .or_default()
                .push(descriptor);
        }

        Self {
            by_type,
            by_id,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the last registration for `service`.
    pub fn get_service(&self, service: &ServiceKey) -> Option<Instance> {
        self.get_service_by_type(service.type_id())
    }

    pub fn get_service_by_type(&self, type_id: TypeId) -> Option<Instance> {
        self.by_type
            .get(&type_id)
            .and_then(|descriptors| descriptors.last())
            .map(|descriptor| self.instantiate(descriptor))
    }

    /// Resolves every registration for `service`, in registration order.
    pub fn get_services(&self, service: &ServiceKey) -> Vec<Instance> {
        self.get_services_by_type(service.type_id())
    }

    pub fn get_services_by_type(&self, type_id: TypeId) -> Vec<Instance> {
        self.by_type
            .get(&type_id)
            .map(|descriptors| descriptors.iter().map(|d| self.instantiate(d)).collect())
            .unwrap_or_default()
    }

    /// Resolves one specific registration, if it is part of this snapshot.
    pub fn get_descriptor_service(&self, id: DescriptorId) -> Option<Instance> {
        self.by_id.get(&id).map(|descriptor| self.instantiate(descriptor))
    }

    /// Typed variant of [`get_service`](Self::get_service).
    ///
    /// Returns `None` when nothing is registered or the stored instance is not a `T`.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.get_service(&ServiceKey::of::<T>())
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// Typed variant of [`get_services`](Self::get_services); skips instances that are not a `T`.
    pub fn get_all<T: Send + Sync + 'static>(&self) -> Vec<Arc<T>> {
        self.get_services(&ServiceKey::of::<T>())
            .into_iter()
            .filter_map(|instance| instance.downcast::<T>().ok())
            .collect()
    }

    pub fn contains(&self, service: &ServiceKey) -> bool {
        self.by_type.contains_key(&service.type_id())
    }

    fn instantiate(&self, descriptor: &ServiceDescriptor) -> Instance {
        if descriptor.lifetime() == Lifetime::Transient || descriptor.has_instance() {
            return descriptor.create();
        }

        let mut cache = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        Arc::clone(
            cache
                .entry(descriptor.id())
                .or_insert_with(|| descriptor.create()),
        )
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("registrations", &self.by_id.len())
            .finish()
    }
}
