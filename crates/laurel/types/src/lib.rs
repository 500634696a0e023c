//! Core type definitions shared across the Laurel registries.
//!
//! This crate provides:
//! - canonical IDs for entities, principals, and registry instances
//! - the tier domain (`Tier`, `MAXIMUM_TIER`)
//! - trait boundaries for the external collaborators the registries consume
//! - the `TierIncreased` event record and its sink boundary

pub mod events;
pub mod ids;
pub mod roles;
pub mod tier;
pub mod traits;

// Re-export primary types at crate root for ergonomic use.
pub use events::{EventSink, NullSink, TierIncreased};
pub use ids::{EntityId, PrincipalId, RegistryId};
pub use roles::Permission;
pub use tier::{Tier, MAXIMUM_TIER};
pub use traits::{ExistenceOracle, OwnershipOracle, RoleGate, TierReader};

#[cfg(test)]
mod tests {
    use super::{EntityId, Tier};

    #[test]
    fn primary_types_are_available() {
        let _ = EntityId::new(1);
        let _ = Tier::NONE;
    }
}
