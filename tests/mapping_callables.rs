//! Integration tests for registering and resolving closures and function pointers.
//!
//! Callables are ordinary services: function pointers, boxed closures and closures with
//! captured state can all be registered, with or without a contract.

use locator_adapter::{
    DependencyResolverExt, MutableDependencyResolverExt, ServiceCollection,
    ServiceCollectionResolver,
};
use std::sync::Arc;

type BoxedOp = Box<dyn Fn(i32) -> i32 + Send + Sync>;

fn resolver() -> ServiceCollectionResolver {
    ServiceCollectionResolver::new(ServiceCollection::new().into_shared())
}

#[test]
fn test_register_function_pointer() {
    let resolver = resolver();
    let multiply_by_two: fn(i32) -> i32 = |x| x * 2;
    resolver.register_constant(multiply_by_two).unwrap();

    let func: Arc<fn(i32) -> i32> = resolver.get().unwrap().unwrap();
    assert_eq!(func(21), 42);
}

#[test]
fn test_register_boxed_closure_factory() {
    let resolver = resolver();
    resolver
        .register_fn(|| Box::new(|x: i32| x + 10) as BoxedOp)
        .unwrap();

    let func: Arc<BoxedOp> = resolver.get().unwrap().unwrap();
    assert_eq!(func(32), 42);
}

#[test]
fn test_named_closures_with_state() {
    let resolver = resolver();
    for (contract, factor) in [("double", 2), ("triple", 3)] {
        resolver
            .register_named_fn(move || Box::new(move |x: i32| x * factor) as BoxedOp, contract)
            .unwrap();
    }

    let double = resolver.get_named::<BoxedOp>("double").unwrap().unwrap();
    let triple = resolver.get_named::<BoxedOp>("triple").unwrap().unwrap();
    assert_eq!(double(21), 42);
    assert_eq!(triple(14), 42);

    // unqualified resolution sees the last registration
    let last = resolver.get::<BoxedOp>().unwrap().unwrap();
    assert_eq!(last(1), 3);
}
