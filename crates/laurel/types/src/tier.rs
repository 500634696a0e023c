//! The tier domain.
//!
//! A tier is a small attribute attached to an entity by the tier registry.
//! Tier 0 is reserved: it is the answer for an entity the existence oracle
//! does not report as live. For live entities the registry stores a
//! zero-based counter and exposes counter + 1, so a freshly observed entity
//! reads as tier 1.

use serde::{Deserialize, Serialize};

/// Nominal upper bound referenced by the registry's limit check.
///
/// Note: the bound check rejects an increase once the exposed tier has
/// reached `MAXIMUM_TIER - 1`, so this constant itself is never reachable
/// through `increase_tier`. The check is kept exactly as documented.
pub const MAXIMUM_TIER: u8 = 7;

/// Exposed tier value of an entity.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    /// The reserved tier of a non-existent or never-observed entity.
    pub const NONE: Tier = Tier(0);

    /// Create a tier from its exposed value.
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Exposed tier for a stored zero-based counter.
    pub fn from_counter(counter: u8) -> Self {
        Self(counter + 1)
    }

    /// Get the exposed tier value.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Whether this is the reserved "no tier" value.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Tier, MAXIMUM_TIER};

    #[test]
    fn counter_zero_exposes_tier_one() {
        assert_eq!(Tier::from_counter(0), Tier::new(1));
        assert!(!Tier::from_counter(0).is_none());
    }

    #[test]
    fn none_is_zero_and_ordered_below_every_tier() {
        assert!(Tier::NONE.is_none());
        for value in 1..=MAXIMUM_TIER {
            assert!(Tier::NONE < Tier::new(value));
        }
    }
}
