use thiserror::Error;

/// Errors reported by resolvers and the global locator.
///
/// A resolution that finds nothing is not an error; it comes back as `Ok(None)` or an
/// empty vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    #[error("Resolver has been disposed")]
    Disposed,
    #[error("Service registration callbacks are not supported")]
    NotSupported,
    #[error("Contract already registered: {contract}")]
    DuplicateContract { contract: String },
    #[error("Type mismatch in resolver for type: {type_name}")]
    TypeMismatch { type_name: &'static str },
    #[error("No current resolver installed in the locator")]
    NoCurrentResolver,
}

pub type Result<T> = std::result::Result<T, ResolverError>;
