use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use laurel_types::{OwnershipOracle, PrincipalId, Tier, TierReader};
use tracing::info;

use crate::error::EngineError;
use crate::formula::{ExponentialPower, VotingPowerFormula};

/// Binding input for [`VotingPowerEngine::initialize`].
///
/// Slots are optional because handles are late-bound from host wiring; an
/// empty slot is rejected with [`EngineError::InvalidBinding`].
#[derive(Clone, Default)]
pub struct EngineBindings {
    /// Oracle enumerating the entities a principal holds.
    pub ownership: Option<Arc<dyn OwnershipOracle>>,
    /// Tier source the engine aggregates over.
    pub tiers: Option<Arc<dyn TierReader>>,
}

/// Aggregates tier-derived voting power across all entities a principal
/// owns.
///
/// The engine is read-only: it mutates nothing, emits nothing, and asks its
/// two bound collaborators one question each per entity. Lifecycle is
/// two-phase like the registry's: [`VotingPowerEngine::new`] then a
/// bind-once [`VotingPowerEngine::initialize`].
pub struct VotingPowerEngine {
    formula: Arc<dyn VotingPowerFormula>,
    inner: RwLock<EngineState>,
}

#[derive(Default)]
struct EngineState {
    ownership: Option<Arc<dyn OwnershipOracle>>,
    tiers: Option<Arc<dyn TierReader>>,
}

impl VotingPowerEngine {
    /// Create an uninitialized engine with the default exponential formula.
    pub fn new() -> Self {
        Self::with_formula(Arc::new(ExponentialPower))
    }

    /// Create an uninitialized engine with a custom formula.
    pub fn with_formula(formula: Arc<dyn VotingPowerFormula>) -> Self {
        Self {
            formula,
            inner: RwLock::new(EngineState::default()),
        }
    }

    /// Bind the ownership oracle and tier source, exactly once.
    ///
    /// Both slots are validated before either is stored; a failed call
    /// binds nothing.
    pub fn initialize(&self, bindings: EngineBindings) -> Result<(), EngineError> {
        let mut state = self.write_state();
        if state.ownership.is_some() || state.tiers.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }

        let ownership = bindings.ownership.ok_or(EngineError::InvalidBinding {
            slot: "ownership_oracle",
        })?;
        let tiers = bindings.tiers.ok_or(EngineError::InvalidBinding {
            slot: "tier_reader",
        })?;
        state.ownership = Some(ownership);
        state.tiers = Some(tiers);

        info!("voting power engine initialized");
        Ok(())
    }

    /// Whether [`VotingPowerEngine::initialize`] has completed.
    pub fn is_initialized(&self) -> bool {
        let state = self.read_state();
        state.ownership.is_some() && state.tiers.is_some()
    }

    /// Voting power of a single tier under the configured formula.
    pub fn power_of(&self, tier: Tier) -> u64 {
        self.formula.power_of(tier)
    }

    /// Total voting power of `principal` across every entity it holds.
    ///
    /// Total read: answers 0 for a principal holding nothing and for an
    /// unbound engine. Enumeration is count + random access and never goes
    /// out of range. The loop assumes one logical snapshot of the
    /// collection and tier state; that guarantee comes from the host's
    /// serialized execution, not from the engine.
    pub fn voting_power_of(&self, principal: &PrincipalId) -> u64 {
        let state = self.read_state();
        let (Some(ownership), Some(tiers)) = (state.ownership.as_ref(), state.tiers.as_ref())
        else {
            return 0;
        };

        let count = ownership.owned_count(principal);
        let mut total = 0u64;
        for index in 0..count {
            let entity = ownership.owned_at(principal, index);
            total = total.saturating_add(self.formula.power_of(tiers.tier_of(entity)));
        }
        total
    }

    fn read_state(&self) -> RwLockReadGuard<'_, EngineState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for VotingPowerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_registry::InMemoryCollection;
    use laurel_types::EntityId;
    use std::collections::HashMap;

    /// Tier source answering from a fixed table.
    struct FixedTiers(HashMap<EntityId, Tier>);

    impl TierReader for FixedTiers {
        fn tier_of(&self, entity: EntityId) -> Tier {
            self.0.get(&entity).copied().unwrap_or(Tier::NONE)
        }
    }

    fn holder() -> PrincipalId {
        PrincipalId::new("alice")
    }

    fn collection_with(entities: &[u64]) -> Arc<InMemoryCollection> {
        let collection = Arc::new(InMemoryCollection::new());
        for id in entities {
            collection.mint(&holder(), EntityId::new(*id));
        }
        collection
    }

    fn tiers_of(pairs: &[(u64, u8)]) -> Arc<FixedTiers> {
        Arc::new(FixedTiers(
            pairs
                .iter()
                .map(|(id, tier)| (EntityId::new(*id), Tier::new(*tier)))
                .collect(),
        ))
    }

    #[test]
    fn initialize_rejects_each_empty_slot() {
        let engine = VotingPowerEngine::new();

        let error = engine.initialize(EngineBindings::default()).unwrap_err();
        assert_eq!(
            error,
            EngineError::InvalidBinding {
                slot: "ownership_oracle"
            }
        );

        let error = engine
            .initialize(EngineBindings {
                ownership: Some(collection_with(&[])),
                tiers: None,
            })
            .unwrap_err();
        assert_eq!(
            error,
            EngineError::InvalidBinding {
                slot: "tier_reader"
            }
        );

        // A rejected call binds nothing, so a complete binding still works.
        assert!(!engine.is_initialized());
        engine
            .initialize(EngineBindings {
                ownership: Some(collection_with(&[])),
                tiers: Some(tiers_of(&[])),
            })
            .unwrap();
        assert!(engine.is_initialized());
    }

    #[test]
    fn initialize_is_one_shot() {
        let engine = VotingPowerEngine::new();
        engine
            .initialize(EngineBindings {
                ownership: Some(collection_with(&[])),
                tiers: Some(tiers_of(&[])),
            })
            .unwrap();

        let error = engine
            .initialize(EngineBindings {
                ownership: Some(collection_with(&[])),
                tiers: Some(tiers_of(&[])),
            })
            .unwrap_err();
        assert_eq!(error, EngineError::AlreadyInitialized);
    }

    #[test]
    fn unbound_engine_answers_zero() {
        let engine = VotingPowerEngine::new();
        assert_eq!(engine.voting_power_of(&holder()), 0);
    }

    #[test]
    fn aggregation_sums_the_formula_over_holdings() {
        let engine = VotingPowerEngine::new();
        engine
            .initialize(EngineBindings {
                ownership: Some(collection_with(&[10, 11, 12])),
                tiers: Some(tiers_of(&[(10, 1), (11, 2), (12, 3)])),
            })
            .unwrap();

        assert_eq!(engine.voting_power_of(&holder()), 1 + 2 + 4);
    }

    #[test]
    fn ownerless_principal_has_zero_power() {
        let engine = VotingPowerEngine::new();
        engine
            .initialize(EngineBindings {
                ownership: Some(collection_with(&[10])),
                tiers: Some(tiers_of(&[(10, 3)])),
            })
            .unwrap();

        assert_eq!(engine.voting_power_of(&PrincipalId::new("nobody")), 0);
    }

    #[test]
    fn custom_formula_replaces_the_default() {
        /// Linear formula: power equals the tier value itself.
        struct LinearPower;

        impl VotingPowerFormula for LinearPower {
            fn power_of(&self, tier: Tier) -> u64 {
                u64::from(tier.get())
            }
        }

        let engine = VotingPowerEngine::with_formula(Arc::new(LinearPower));
        engine
            .initialize(EngineBindings {
                ownership: Some(collection_with(&[10, 11, 12])),
                tiers: Some(tiers_of(&[(10, 1), (11, 2), (12, 3)])),
            })
            .unwrap();

        assert_eq!(engine.voting_power_of(&holder()), 1 + 2 + 3);
    }
}
