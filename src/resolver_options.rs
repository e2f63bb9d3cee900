//! Resolver configuration.
//!
//! [`ResolverOptions`] is plain data and implements serde's traits, so it can be embedded in
//! whatever configuration file the application already loads.

use serde::{Deserialize, Serialize};

/// How a contract-qualified resolution finds its instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractLookup {
    /// Resolve exactly the descriptor registered under the contract.
    #[default]
    Descriptor,
    /// Resolve by the implementation type of the descriptor registered under the contract.
    ///
    /// Matches any registration sharing that type, so one contract may return another
    /// contract's instance.
    ImplementationType,
}

/// What `register` does when the contract is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateContract {
    /// Keep the existing registration and report success.
    #[default]
    Ignore,
    /// Keep the existing registration and fail with `ResolverError::DuplicateContract`.
    Reject,
}

/// Options for [`ServiceCollectionResolver`](crate::ServiceCollectionResolver).
///
/// # Examples
///
/// ```rust
/// use locator_adapter::{ContractLookup, DuplicateContract, ResolverOptions};
///
/// let options = ResolverOptions::default().with_duplicate_contract(DuplicateContract::Reject);
/// assert_eq!(options.contract_lookup, ContractLookup::Descriptor);
/// assert_eq!(options.duplicate_contract, DuplicateContract::Reject);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverOptions {
    pub contract_lookup: ContractLookup,
    pub duplicate_contract: DuplicateContract,
}

impl ResolverOptions {
    pub fn with_contract_lookup(mut self, contract_lookup: ContractLookup) -> Self {
        self.contract_lookup = contract_lookup;
        self
    }

    pub fn with_duplicate_contract(mut self, duplicate_contract: DuplicateContract) -> Self {
        self.duplicate_contract = duplicate_contract;
        self
    }
}
