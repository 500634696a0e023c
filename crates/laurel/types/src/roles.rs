//! Role tags checked through the injected role gate.

use serde::{Deserialize, Serialize};

/// Permission tag a caller must hold for a gated operation.
///
/// Role administration (granting, revoking, admin hierarchies) lives in the
/// host; the registries only ask the gate a yes/no question per call.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// May call `increase_tier` on a tier registry.
    TierManager,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::TierManager => write!(f, "tier-manager"),
        }
    }
}
