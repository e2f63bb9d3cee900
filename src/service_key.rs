//! Type identity used to key registrations.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a service type inside a collection or resolver.
///
/// Equality and hashing only look at the `TypeId`; the type name is kept for
/// diagnostics and tracing events.
///
/// # Examples
///
/// ```rust
/// use locator_adapter::ServiceKey;
///
/// let key = ServiceKey::of::<String>();
/// assert_eq!(key, ServiceKey::of::<String>());
/// assert_ne!(key, ServiceKey::of::<u32>());
/// assert_eq!(key.type_name(), "alloc::string::String");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// Key for the type `T`. Unsized types such as `dyn Trait` are allowed.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    trait Greeter {}

    #[test]
    fn test_equality_by_type() {
        assert_eq!(ServiceKey::of::<i32>(), ServiceKey::of::<i32>());
        assert_ne!(ServiceKey::of::<i32>(), ServiceKey::of::<i64>());
    }

    #[test]
    fn test_unsized_keys() {
        let key = ServiceKey::of::<dyn Greeter>();
        assert_eq!(key.type_id(), TypeId::of::<dyn Greeter>());
        assert!(key.type_name().contains("Greeter"));
    }

    #[test]
    fn test_hash_set_deduplicates() {
        let mut keys = HashSet::new();
        keys.insert(ServiceKey::of::<String>());
        keys.insert(ServiceKey::of::<String>());
        keys.insert(ServiceKey::of::<u8>());
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(ServiceKey::of::<u8>().to_string(), "u8");
    }
}
