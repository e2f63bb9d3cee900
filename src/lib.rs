//! # Locator Adapter
//!
//! A contract-aware service locator on top of a type-keyed service collection.
//!
//! The [`ServiceCollection`] registers services by type only. [`ServiceCollectionResolver`]
//! adapts it to the [`MutableDependencyResolver`] interface, where every operation takes a
//! service type and an optional contract string, by keeping a side table of contract-qualified
//! registrations.
//!
//! ## Quick Start
//!
//! ```rust
//! use locator_adapter::{
//!     DependencyResolverExt, MutableDependencyResolverExt, ServiceCollection,
//!     ServiceCollectionResolver,
//! };
//!
//! let services = ServiceCollection::new().into_shared();
//! let resolver = ServiceCollectionResolver::new(services.clone());
//!
//! // Unqualified and contract-qualified registrations
//! resolver.register_fn(|| "Hello, World!".to_string()).unwrap();
//! resolver.register_named_fn(|| "Hello, Other!".to_string(), "Other").unwrap();
//!
//! let message = resolver.get_named::<String>("Other").unwrap().unwrap();
//! assert_eq!(&*message, "Hello, Other!");
//!
//! // Registrations made on the collection are visible right away
//! services.lock().add_singleton(42u32);
//! assert_eq!(*resolver.get::<u32>().unwrap().unwrap(), 42);
//! ```
//!
//! ## Features
//!
//! - **Contracts**: several registrations of one type told apart by name
//! - **No build step**: each resolution sees the collection as it is now
//! - **Explicit lifecycle**: disposed resolvers fail with [`ResolverError::Disposed`]
//! - **Tracing support**: `tracing` logs plus an optional per-resolver event callback
//! - **Colors** (feature `colors`): lossless [`Color`] / [`NativeColor`] conversions
//!
//! ## Main Items
//!
//! - [`ServiceCollectionResolver`] - the locator adapter
//! - [`DependencyResolverExt`] / [`MutableDependencyResolverExt`] - typed helpers
//! - [`ResolverOptions`] - contract lookup and duplicate contract policies
//! - [`locator`] - optional process-wide resolver slot

#[cfg(feature = "colors")]
mod color;
pub mod locator;
#[cfg(feature = "colors")]
mod native_color;
mod resolver;
mod resolver_error;
mod resolver_event;
mod resolver_options;
mod resolver_trait;
mod service_collection;
mod service_key;
mod service_provider;

#[cfg(feature = "colors")]
pub use color::{Color, ColorExt, NativeColorExt};
pub use locator::ServiceCollectionExt;
#[cfg(feature = "colors")]
pub use native_color::{NativeColor, SolidColorBrush};
pub use resolver::ServiceCollectionResolver;
pub use resolver_error::{ResolverError, Result};
pub use resolver_event::{ResolverEvent, TraceCallback};
pub use resolver_options::{ContractLookup, DuplicateContract, ResolverOptions};
pub use resolver_trait::{
    CallbackSubscription, DependencyResolver, DependencyResolverExt, MutableDependencyResolver,
    MutableDependencyResolverExt, RegistrationCallback,
};
pub use service_collection::{
    erase, DescriptorId, Factory, Instance, Lifetime, ServiceCollection, ServiceDescriptor,
    SharedServiceCollection,
};
pub use service_key::ServiceKey;
pub use service_provider::ServiceProvider;
