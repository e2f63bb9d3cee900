/// Events emitted by a resolver during operations.
///
/// These events are passed to the tracing callback set via
/// [`ServiceCollectionResolver::set_trace_callback`](crate::ServiceCollectionResolver::set_trace_callback).
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use locator_adapter::ResolverEvent;
///
/// let event = ResolverEvent::Register { type_name: "i32", contract: None };
/// assert_eq!(event.to_string(), "register { type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverEvent {
    /// A registration was requested.
    Register {
        type_name: &'static str,
        contract: Option<String>,
    },

    /// A single or multi resolution was performed.
    Resolve {
        type_name: &'static str,
        contract: Option<String>,
        /// Number of instances returned
        found: usize,
    },

    /// Registrations were removed.
    Unregister {
        type_name: &'static str,
        contract: Option<String>,
        /// Number of descriptors removed from the collection
        removed: usize,
    },

    /// The resolver was disposed.
    Dispose {},
}

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&ResolverEvent) + Send + Sync + 'static;

struct Contract<'a>(&'a Option<String>);

impl std::fmt::Display for Contract<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(contract) => write!(f, ", contract: {}", contract),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for ResolverEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverEvent::Register {
                type_name,
                contract,
            } => {
                write!(
                    f,
                    "register {{ type_name: {}{} }}",
                    type_name,
                    Contract(contract)
                )
            }
            ResolverEvent::Resolve {
                type_name,
                contract,
                found,
            } => {
                write!(
                    f,
                    "resolve {{ type_name: {}{}, found: {} }}",
                    type_name,
                    Contract(contract),
                    found
                )
            }
            ResolverEvent::Unregister {
                type_name,
                contract,
                removed,
            } => {
                write!(
                    f,
                    "unregister {{ type_name: {}{}, removed: {} }}",
                    type_name,
                    Contract(contract),
                    removed
                )
            }
            ResolverEvent::Dispose {} => write!(f, "Disposing the Resolver"),
        }
    }
}
