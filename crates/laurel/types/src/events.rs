//! Event records produced by the registries.

use serde::{Deserialize, Serialize};

use crate::ids::{EntityId, RegistryId};
use crate::tier::Tier;

/// Notification of a committed tier increase.
///
/// Emitted exactly once per successful `increase_tier` call, after the
/// counter mutation is committed and before the call returns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierIncreased {
    /// Registry instance that performed the mutation.
    pub registry: RegistryId,
    /// Entity whose tier changed.
    pub entity: EntityId,
    /// The new exposed tier.
    pub new_tier: Tier,
}

/// Trait for components that consume tier events.
pub trait EventSink: Send + Sync {
    /// Called once per committed tier increase.
    fn on_tier_increased(&self, event: &TierIncreased);
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_tier_increased(&self, _event: &TierIncreased) {}
}

#[cfg(test)]
mod tests {
    use super::TierIncreased;
    use crate::ids::{EntityId, RegistryId};
    use crate::tier::Tier;

    #[test]
    fn event_payload_serializes_with_raw_values() {
        let event = TierIncreased {
            registry: RegistryId::new("badges"),
            entity: EntityId::new(42),
            new_tier: Tier::new(2),
        };

        let encoded = serde_json::to_value(&event).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "registry": "badges",
                "entity": 42,
                "new_tier": 2,
            })
        );
    }
}
