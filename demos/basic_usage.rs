//! Basic usage example for locator-adapter.
//!
//! Demonstrates:
//! - Installing a resolver over a shared collection with `use_dependency_resolver()`
//! - Unqualified and contract-qualified registrations
//! - Resolving through the process-wide locator
//! - Unregistering a single contract
//!
//! Run with: `cargo run --example basic_usage`

use locator_adapter::{
    locator, DependencyResolverExt, MutableDependencyResolverExt, Result, ServiceCollection,
    ServiceCollectionExt,
};

#[derive(Debug)]
struct Database {
    url: String,
}

fn main() -> Result<()> {
    println!("=== locator-adapter: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Install a resolver over a shared collection
    // -------------------------------------------------------------------------
    println!("1. Installing the resolver...");

    let services = ServiceCollection::new().into_shared();
    services.lock().add_singleton(String::from("my-app"));
    let resolver = services.use_dependency_resolver();
    resolver.set_trace_callback(|event| println!("   [trace] {}", event));

    // -------------------------------------------------------------------------
    // 2. Register services with and without contracts
    // -------------------------------------------------------------------------
    println!("\n2. Registering services...");

    resolver.register_fn(|| 42u32)?;
    resolver.register_named_fn(
        || Database {
            url: "postgres://primary".to_string(),
        },
        "primary",
    )?;
    resolver.register_named_fn(
        || Database {
            url: "postgres://replica".to_string(),
        },
        "replica",
    )?;

    // -------------------------------------------------------------------------
    // 3. Resolve through the ambient locator
    // -------------------------------------------------------------------------
    println!("\n3. Resolving...");

    let current = locator::current()?;
    if let Some(name) = current.get::<String>()? {
        println!("   app name: {}", name);
    }
    if let Some(answer) = current.get::<u32>()? {
        println!("   answer: {}", answer);
    }
    for contract in ["primary", "replica", "cache"] {
        match current.get_named::<Database>(contract)? {
            Some(db) => println!("   {} -> {}", contract, db.url),
            None => println!("   {} -> not registered", contract),
        }
    }

    // -------------------------------------------------------------------------
    // 4. Unregister one contract
    // -------------------------------------------------------------------------
    println!("\n4. Unregistering the replica...");

    current.unregister_current_of::<Database>(Some("replica"))?;
    println!("   replica registered: {}", resolver.has_contract("replica")?);
    let primary = current.get_named::<Database>("primary")?;
    println!("   primary still resolves: {}", primary.is_some());

    locator::clear_current();
    println!("\n=== Done ===");
    Ok(())
}
