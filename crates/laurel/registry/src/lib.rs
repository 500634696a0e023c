//! Role-gated tier registry over externally-owned entities.
//!
//! This crate provides:
//! - [`TierRegistry`], the single mutating component of the system: a
//!   per-entity monotonic tier counter bound to an existence oracle,
//!   mutated only through the role-gated [`TierRegistry::increase_tier`]
//! - in-memory collaborator implementations (`memory`) for tests, local
//!   demos, and embedding

pub mod error;
pub mod memory;
pub mod registry;

pub use error::RegistryError;
pub use memory::{InMemoryCollection, RecordingSink, StaticRoleGate};
pub use registry::{RegistryBindings, TierRegistry};
