//! Locator adapter over a [`SharedServiceCollection`].
//!
//! The collection indexes registrations by type only, so contract-qualified registrations
//! are tracked in a side table mapping each contract to the one descriptor registered
//! under it. A fresh [`ServiceProvider`](crate::ServiceProvider) is built from the
//! collection for every resolution, which makes registrations visible immediately, whether
//! they were made through the resolver or directly on the shared collection.
//!
//! # Examples
//!
//! ```rust
//! use locator_adapter::{
//!     DependencyResolverExt, MutableDependencyResolverExt, ServiceCollection,
//!     ServiceCollectionResolver,
//! };
//!
//! let resolver = ServiceCollectionResolver::new(ServiceCollection::new().into_shared());
//! resolver.register_named_fn(|| "primary".to_string(), "db").unwrap();
//! resolver.register_named_fn(|| "replica".to_string(), "db-replica").unwrap();
//!
//! let replica = resolver.get_named::<String>("db-replica").unwrap().unwrap();
//! assert_eq!(&*replica, "replica");
//!
//! // An unknown contract never falls back to other registrations
//! assert!(resolver.get_named::<String>("cache").unwrap().is_none());
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, trace, warn};

use crate::{
    CallbackSubscription, ContractLookup, DependencyResolver, DuplicateContract, Factory,
    Instance, Lifetime, MutableDependencyResolver, RegistrationCallback, ResolverError,
    ResolverEvent, ResolverOptions, Result, ServiceDescriptor, ServiceKey, ServiceProvider,
    SharedServiceCollection, TraceCallback,
};

enum Lookup {
    Type,
    Contract(ServiceDescriptor),
    Miss,
}

enum ResolverState {
    Active {
        services: SharedServiceCollection,
        named: HashMap<String, ServiceDescriptor>,
    },
    Disposed,
}

/// [`MutableDependencyResolver`] backed by a [`SharedServiceCollection`].
///
/// The resolver does not own the collection: the caller keeps its own handle and may keep
/// registering on it. The contract table is owned by the resolver.
///
/// Each call is synchronous and takes the resolver's lock before the collection's lock, so
/// never call the resolver while holding [`SharedServiceCollection::lock`]. Individual calls
/// are safe from several threads, but sequences of calls (register then resolve) need
/// external coordination if other threads mutate the same resolver in between.
pub struct ServiceCollectionResolver {
    state: Mutex<ResolverState>,
    options: ResolverOptions,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl ServiceCollectionResolver {
    pub fn new(services: SharedServiceCollection) -> Self {
        Self::with_options(services, ResolverOptions::default())
    }

    pub fn with_options(services: SharedServiceCollection, options: ResolverOptions) -> Self {
        Self {
            state: Mutex::new(ResolverState::Active {
                services,
                named: HashMap::new(),
            }),
            options,
            trace: Mutex::new(None),
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn is_disposed(&self) -> bool {
        matches!(*self.state(), ResolverState::Disposed)
    }

    /// Returns `true` if `contract` is currently registered.
    ///
    /// # Errors
    ///
    /// - The resolver is disposed
    pub fn has_contract(&self, contract: &str) -> Result<bool> {
        match &*self.state() {
            ResolverState::Active { named, .. } => Ok(named.contains_key(contract)),
            ResolverState::Disposed => Err(ResolverError::Disposed),
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Tracing
    // ---------------------------------------------------------------------------------------------

    /// Sets a tracing callback that will be invoked on every resolver interaction.
    ///
    /// The callback runs after the resolver's locks are released, so it may call back into
    /// the resolver.
    ///
    /// # Example
    /// ```rust
    /// use locator_adapter::{ServiceCollection, ServiceCollectionResolver};
    ///
    /// let resolver = ServiceCollectionResolver::new(ServiceCollection::new().into_shared());
    /// resolver.set_trace_callback(|event| println!("[resolver-trace] {}", event));
    /// ```
    pub fn set_trace_callback(&self, callback: impl Fn(&ResolverEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: ResolverEvent) {
        trace!(target: "locator_adapter", %event, "resolver event");

        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Resolution
    // ---------------------------------------------------------------------------------------------

    fn state(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn resolve(
        &self,
        service: &ServiceKey,
        contract: Option<&str>,
        all: bool,
    ) -> Result<Vec<Instance>> {
        // factories run after the state lock is released so they may use the resolver
        let (services, lookup) = {
            let state = self.state();
            let ResolverState::Active { services, named } = &*state else {
                return Err(ResolverError::Disposed);
            };

            let lookup = match contract {
                Some(contract) => match named.get(contract) {
                    Some(descriptor) if self.contract_serves(descriptor, service) => {
                        Lookup::Contract(descriptor.clone())
                    }
                    _ => Lookup::Miss,
                },
                None => Lookup::Type,
            };
            (services.clone(), lookup)
        };

        let provider = services.lock().build_service_provider();
        let instances = match lookup {
            Lookup::Type if all => provider.get_services(service),
            Lookup::Type => provider.get_service(service).into_iter().collect(),
            Lookup::Contract(descriptor) => self.resolve_contract(&provider, &descriptor, all),
            Lookup::Miss => Vec::new(),
        };

        self.emit_event(ResolverEvent::Resolve {
            type_name: service.type_name(),
            contract: contract.map(str::to_owned),
            found: instances.len(),
        });

        Ok(instances)
    }

    /// Whether the descriptor stored under a contract answers requests for `service`.
    ///
    /// Implementation-type lookup ignores the requested type entirely.
    fn contract_serves(&self, descriptor: &ServiceDescriptor, service: &ServiceKey) -> bool {
        match self.options.contract_lookup {
            ContractLookup::Descriptor => descriptor.service_type() == *service,
            ContractLookup::ImplementationType => true,
        }
    }

    fn resolve_contract(
        &self,
        provider: &ServiceProvider,
        descriptor: &ServiceDescriptor,
        all: bool,
    ) -> Vec<Instance> {
        match self.options.contract_lookup {
            ContractLookup::Descriptor => provider
                .get_descriptor_service(descriptor.id())
                .into_iter()
                .collect(),
            ContractLookup::ImplementationType if all => {
                provider.get_services_by_type(descriptor.implementation_type())
            }
            ContractLookup::ImplementationType => provider
                .get_service_by_type(descriptor.implementation_type())
                .into_iter()
                .collect(),
        }
    }

    fn duplicate_contract(&self, service: &ServiceKey, contract: &str) -> Result<()> {
        match self.options.duplicate_contract {
            DuplicateContract::Ignore => {
                debug!(
                    service = service.type_name(),
                    contract, "contract already registered, keeping existing"
                );
                Ok(())
            }
            DuplicateContract::Reject => {
                warn!(
                    service = service.type_name(),
                    contract, "rejected duplicate contract registration"
                );
                Err(ResolverError::DuplicateContract {
                    contract: contract.to_owned(),
                })
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Unregistration
    // ---------------------------------------------------------------------------------------------

    /// Shared body of `unregister_current` and `unregister_all`.
    ///
    /// The collection has no notion of a "current" registration, so both remove every
    /// match: the named descriptor for a contract, or every descriptor of the type.
    fn unregister(&self, service: &ServiceKey, contract: Option<&str>) -> Result<()> {
        let removed = {
            let mut state = self.state();
            let ResolverState::Active { services, named } = &mut *state else {
                return Err(ResolverError::Disposed);
            };

            match contract {
                Some(contract) => {
                    let id = named
                        .get(contract)
                        .filter(|descriptor| self.contract_serves(descriptor, service))
                        .map(ServiceDescriptor::id);
                    match id {
                        Some(id) => {
                            named.remove(contract);
                            usize::from(services.lock().remove(id))
                        }
                        None => 0,
                    }
                }
                None => {
                    let removed = services
                        .lock()
                        .remove_where(|descriptor| descriptor.service_type() == *service);
                    let ids: HashSet<_> = removed.iter().map(ServiceDescriptor::id).collect();
                    named.retain(|_, descriptor| !ids.contains(&descriptor.id()));
                    removed.len()
                }
            }
        };

        debug!(
            service = service.type_name(),
            contract, removed, "unregistered service"
        );
        self.emit_event(ResolverEvent::Unregister {
            type_name: service.type_name(),
            contract: contract.map(str::to_owned),
            removed,
        });

        Ok(())
    }
}

impl DependencyResolver for ServiceCollectionResolver {
    /// Resolves the last registration of `service`, or the descriptor registered under
    /// `contract`.
    ///
    /// An unknown contract resolves to `None` even when unqualified registrations of
    /// `service` exist. With [`ContractLookup::Descriptor`] so does a contract registered for
    /// another type.
    fn get_service(
        &self,
        service: &ServiceKey,
        contract: Option<&str>,
    ) -> Result<Option<Instance>> {
        Ok(self.resolve(service, contract, false)?.pop())
    }

    fn get_services(&self, service: &ServiceKey, contract: Option<&str>) -> Result<Vec<Instance>> {
        self.resolve(service, contract, true)
    }

    /// Drops the collection handle and the contract table. Later calls fail with
    /// [`ResolverError::Disposed`].
    fn dispose(&self) {
        let previous = std::mem::replace(&mut *self.state(), ResolverState::Disposed);
        if let ResolverState::Active { named, .. } = previous {
            debug!(contracts = named.len(), "disposed resolver");
            self.emit_event(ResolverEvent::Dispose {});
        }
    }
}

impl MutableDependencyResolver for ServiceCollectionResolver {
    /// Registers `factory` for `service`.
    ///
    /// Without a contract every call adds another scoped registration. With a new contract
    /// the factory runs once, right away, and its instance is registered as a singleton in
    /// both the collection and the contract table. With a contract that is already taken
    /// nothing changes; [`DuplicateContract`] decides whether that is reported.
    fn register(
        &self,
        factory: Factory,
        service: ServiceKey,
        contract: Option<&str>,
    ) -> Result<()> {
        let id = match contract {
            Some(contract) => {
                if self.has_contract(contract)? {
                    return self.duplicate_contract(&service, contract);
                }

                // run the factory without holding the state lock
                let descriptor = ServiceDescriptor::from_instance(service, factory());

                let mut state = self.state();
                let ResolverState::Active { services, named } = &mut *state else {
                    return Err(ResolverError::Disposed);
                };
                if named.contains_key(contract) {
                    drop(state);
                    return self.duplicate_contract(&service, contract);
                }
                let id = services.lock().add(descriptor.clone());
                named.insert(contract.to_owned(), descriptor);
                id
            }
            None => {
                let state = self.state();
                let ResolverState::Active { services, .. } = &*state else {
                    return Err(ResolverError::Disposed);
                };
                let id = services.lock().add(ServiceDescriptor::from_factory(
                    service,
                    Lifetime::Scoped,
                    factory,
                ));
                id
            }
        };

        debug!(
            service = service.type_name(),
            contract,
            descriptor = %id,
            "registered service"
        );
        self.emit_event(ResolverEvent::Register {
            type_name: service.type_name(),
            contract: contract.map(str::to_owned),
        });

        Ok(())
    }

    fn unregister_current(&self, service: &ServiceKey, contract: Option<&str>) -> Result<()> {
        self.unregister(service, contract)
    }

    fn unregister_all(&self, service: &ServiceKey, contract: Option<&str>) -> Result<()> {
        self.unregister(service, contract)
    }

    /// Always fails: the collection cannot report registrations as they happen.
    fn service_registration_callback(
        &self,
        _service: &ServiceKey,
        _contract: Option<&str>,
        _callback: RegistrationCallback,
    ) -> Result<CallbackSubscription> {
        Err(ResolverError::NotSupported)
    }
}

impl std::fmt::Debug for ServiceCollectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCollectionResolver")
            .field("options", &self.options)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
