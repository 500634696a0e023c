use laurel_types::{EntityId, Permission, PrincipalId, Tier};
use thiserror::Error;

/// Errors returned by tier registry operations.
///
/// Every failure aborts the requested operation with no state change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("binding slot `{slot}` is empty")]
    InvalidBinding { slot: &'static str },

    #[error("registry is already initialized")]
    AlreadyInitialized,

    #[error("registry is not initialized")]
    NotInitialized,

    #[error("caller {caller} lacks the {permission} permission")]
    AccessDenied {
        caller: PrincipalId,
        permission: Permission,
    },

    #[error("entity {entity} does not exist")]
    EntityNotFound { entity: EntityId },

    #[error("entity {entity} is already at tier {tier}, the highest reachable tier")]
    TierLimitExceeded { entity: EntityId, tier: Tier },
}
