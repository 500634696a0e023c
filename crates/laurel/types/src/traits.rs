//! Trait boundaries for the external collaborators the registries consume.
//!
//! The registries never own their collaborators' lifecycles; they hold one
//! immutable handle per boundary, bound once during initialization.

use crate::ids::{EntityId, PrincipalId};
use crate::roles::Permission;
use crate::tier::Tier;

/// Existence oracle — implemented by the token registry that owns entity
/// lifecycles.
pub trait ExistenceOracle: Send + Sync {
    /// Whether the entity currently exists.
    ///
    /// Side-effect free; callable any number of times per operation.
    fn exists(&self, entity: EntityId) -> bool;
}

/// Ownership oracle — enumerates the entities a principal currently holds.
pub trait OwnershipOracle: Send + Sync {
    /// Number of entities held by `principal`.
    fn owned_count(&self, principal: &PrincipalId) -> u64;

    /// The `index`-th entity held by `principal`, for
    /// `index < owned_count(principal)`.
    ///
    /// An out-of-range index is a programming error in the caller;
    /// implementations may panic.
    fn owned_at(&self, principal: &PrincipalId, index: u64) -> EntityId;
}

/// Role gate — answers whether a caller holds a permission.
pub trait RoleGate: Send + Sync {
    /// Check if `caller` holds `permission`.
    fn has_permission(&self, caller: &PrincipalId, permission: Permission) -> bool;
}

/// Read boundary over tier state, consumed by aggregation engines.
///
/// Implemented by `TierRegistry`; kept as a trait so engines can aggregate
/// over any tier source.
pub trait TierReader: Send + Sync {
    /// Exposed tier of `entity`; `Tier::NONE` when the entity does not
    /// exist.
    fn tier_of(&self, entity: EntityId) -> Tier;
}
