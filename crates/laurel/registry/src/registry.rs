use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use laurel_types::{
    EntityId, EventSink, ExistenceOracle, Permission, PrincipalId, RegistryId, RoleGate, Tier,
    TierIncreased, TierReader, MAXIMUM_TIER,
};
use tracing::{debug, info};

use crate::error::RegistryError;

/// Binding input for [`TierRegistry::initialize`].
///
/// Slots are optional because handles are late-bound from host wiring; an
/// empty slot is rejected with [`RegistryError::InvalidBinding`].
#[derive(Clone, Default)]
pub struct RegistryBindings {
    /// Oracle answering entity existence.
    pub existence: Option<Arc<dyn ExistenceOracle>>,
}

/// Role-gated tier registry over externally-owned entities.
///
/// The registry attaches a monotonic tier counter to entity IDs whose
/// lifecycle is owned elsewhere. Existence is always the bound oracle's
/// answer: an entity the oracle does not report reads as [`Tier::NONE`], a
/// live entity reads as its stored counter + 1. Counters are created
/// implicitly on the first successful increase and never deleted, so a
/// stored zero and an absent entry are indistinguishable.
///
/// Lifecycle is two-phase: [`TierRegistry::new`] allocates an uninitialized
/// instance with its injected capabilities, [`TierRegistry::initialize`]
/// binds the oracle exactly once. Rebinding fails.
pub struct TierRegistry {
    id: RegistryId,
    role_gate: Arc<dyn RoleGate>,
    events: Arc<dyn EventSink>,
    inner: RwLock<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    existence: Option<Arc<dyn ExistenceOracle>>,
    counters: HashMap<EntityId, u8>,
}

impl TierRegistry {
    /// Create an uninitialized registry.
    ///
    /// The role gate and event sink are capabilities of the instance, not
    /// bindings; they are fixed at construction.
    pub fn new(id: RegistryId, role_gate: Arc<dyn RoleGate>, events: Arc<dyn EventSink>) -> Self {
        Self {
            id,
            role_gate,
            events,
            inner: RwLock::new(RegistryState::default()),
        }
    }

    /// Registry identity carried in emitted events.
    pub fn id(&self) -> &RegistryId {
        &self.id
    }

    /// Bind the existence oracle, exactly once.
    pub fn initialize(&self, bindings: RegistryBindings) -> Result<(), RegistryError> {
        let mut state = self.write_state();
        if state.existence.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }

        let existence = bindings.existence.ok_or(RegistryError::InvalidBinding {
            slot: "existence_oracle",
        })?;
        state.existence = Some(existence);

        info!(registry = %self.id, "tier registry initialized");
        Ok(())
    }

    /// Whether [`TierRegistry::initialize`] has completed.
    pub fn is_initialized(&self) -> bool {
        self.read_state().existence.is_some()
    }

    /// Exposed tier of `entity`.
    ///
    /// Total and side-effect free: [`Tier::NONE`] when the registry is
    /// unbound or the oracle reports the entity does not exist, stored
    /// counter + 1 otherwise. An ID the registry has never seen reads as
    /// counter 0, i.e. tier 1, as long as the oracle reports it live.
    pub fn tier_of(&self, entity: EntityId) -> Tier {
        let state = self.read_state();
        let Some(existence) = state.existence.as_ref() else {
            return Tier::NONE;
        };
        if !existence.exists(entity) {
            return Tier::NONE;
        }
        Tier::from_counter(state.counters.get(&entity).copied().unwrap_or(0))
    }

    /// Increase the tier of `entity` by exactly one.
    ///
    /// The only mutating entry point: there is no decrement, no direct
    /// setter, no batch form. Preconditions, in order: the caller holds
    /// [`Permission::TierManager`], the registry is bound, the oracle
    /// reports the entity live, and the exposed tier is below
    /// `MAXIMUM_TIER - 1`. On success a [`TierIncreased`] event is emitted
    /// after the counter is committed, and the new exposed tier is
    /// returned.
    pub fn increase_tier(
        &self,
        caller: &PrincipalId,
        entity: EntityId,
    ) -> Result<Tier, RegistryError> {
        if !self
            .role_gate
            .has_permission(caller, Permission::TierManager)
        {
            debug!(registry = %self.id, caller = %caller, "tier increase denied");
            return Err(RegistryError::AccessDenied {
                caller: caller.clone(),
                permission: Permission::TierManager,
            });
        }

        let new_tier = {
            let mut state = self.write_state();
            let existence = state
                .existence
                .as_ref()
                .ok_or(RegistryError::NotInitialized)?
                .clone();
            if !existence.exists(entity) {
                return Err(RegistryError::EntityNotFound { entity });
            }

            let counter = state.counters.get(&entity).copied().unwrap_or(0);
            let current = Tier::from_counter(counter);
            // The documented bound check: an increase is refused once the
            // exposed tier has reached MAXIMUM_TIER - 1, so the nominal
            // constant itself is never reached.
            if current.get() >= MAXIMUM_TIER - 1 {
                return Err(RegistryError::TierLimitExceeded {
                    entity,
                    tier: current,
                });
            }

            let next = counter + 1;
            state.counters.insert(entity, next);
            Tier::from_counter(next)
        };

        self.events.on_tier_increased(&TierIncreased {
            registry: self.id.clone(),
            entity,
            new_tier,
        });
        info!(registry = %self.id, entity = %entity, tier = %new_tier, "tier increased");
        Ok(new_tier)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, RegistryState> {
        // A panicked writer cannot leave the counter table half-updated, so
        // a poisoned guard is safe to recover.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TierReader for TierRegistry {
    fn tier_of(&self, entity: EntityId) -> Tier {
        TierRegistry::tier_of(self, entity)
    }
}
