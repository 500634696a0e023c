//! In-memory collaborator implementations used for tests, local demos, and
//! embedding.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use laurel_types::{
    EntityId, EventSink, ExistenceOracle, OwnershipOracle, Permission, PrincipalId, RoleGate,
    TierIncreased,
};

/// In-memory token collection implementing both oracle boundaries.
///
/// Enumeration order is mint order, so repeated aggregation over an
/// unchanged collection is deterministic.
#[derive(Default)]
pub struct InMemoryCollection {
    inner: RwLock<CollectionState>,
}

#[derive(Default)]
struct CollectionState {
    owners: HashMap<EntityId, PrincipalId>,
    holdings: HashMap<PrincipalId, Vec<EntityId>>,
}

impl InMemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `entity` to `owner`. Returns false if the entity already exists.
    pub fn mint(&self, owner: &PrincipalId, entity: EntityId) -> bool {
        let mut state = self.write_state();
        if state.owners.contains_key(&entity) {
            return false;
        }
        state.owners.insert(entity, owner.clone());
        state.holdings.entry(owner.clone()).or_default().push(entity);
        true
    }

    /// Burn `entity`. Returns false if it does not exist.
    pub fn burn(&self, entity: EntityId) -> bool {
        let mut state = self.write_state();
        let Some(owner) = state.owners.remove(&entity) else {
            return false;
        };
        if let Some(held) = state.holdings.get_mut(&owner) {
            held.retain(|held_entity| *held_entity != entity);
        }
        true
    }

    /// Current owner of `entity`, if it exists.
    pub fn owner_of(&self, entity: EntityId) -> Option<PrincipalId> {
        self.read_state().owners.get(&entity).cloned()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CollectionState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CollectionState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExistenceOracle for InMemoryCollection {
    fn exists(&self, entity: EntityId) -> bool {
        self.read_state().owners.contains_key(&entity)
    }
}

impl OwnershipOracle for InMemoryCollection {
    fn owned_count(&self, principal: &PrincipalId) -> u64 {
        self.read_state()
            .holdings
            .get(principal)
            .map_or(0, |held| held.len() as u64)
    }

    fn owned_at(&self, principal: &PrincipalId, index: u64) -> EntityId {
        // Out-of-range access is a caller error per the oracle contract.
        self.read_state().holdings[principal][index as usize]
    }
}

/// Role gate backed by an explicit grant table.
#[derive(Default)]
pub struct StaticRoleGate {
    grants: RwLock<HashSet<(PrincipalId, Permission)>>,
}

impl StaticRoleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `permission` to `principal`.
    pub fn grant(&self, principal: &PrincipalId, permission: Permission) {
        self.write_grants().insert((principal.clone(), permission));
    }

    /// Revoke `permission` from `principal`.
    pub fn revoke(&self, principal: &PrincipalId, permission: Permission) {
        self.write_grants().remove(&(principal.clone(), permission));
    }

    fn read_grants(&self) -> RwLockReadGuard<'_, HashSet<(PrincipalId, Permission)>> {
        self.grants.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_grants(&self) -> RwLockWriteGuard<'_, HashSet<(PrincipalId, Permission)>> {
        self.grants.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoleGate for StaticRoleGate {
    fn has_permission(&self, caller: &PrincipalId, permission: Permission) -> bool {
        self.read_grants().contains(&(caller.clone(), permission))
    }
}

/// Event sink that records every event, in emission order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TierIncreased>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<TierIncreased> {
        self.lock_events().clone()
    }

    fn lock_events(&self) -> MutexGuard<'_, Vec<TierIncreased>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for RecordingSink {
    fn on_tier_increased(&self, event: &TierIncreased) {
        self.lock_events().push(event.clone());
    }
}
