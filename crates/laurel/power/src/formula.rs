//! Voting-power formulas.

use laurel_types::Tier;

/// Strategy mapping a single entity's tier to voting power.
///
/// The aggregation loop in
/// [`VotingPowerEngine`](crate::engine::VotingPowerEngine) is written
/// against this trait, so a host can substitute another monotonic formula
/// without touching the aggregation.
pub trait VotingPowerFormula: Send + Sync {
    /// Voting power of one entity at `tier`.
    fn power_of(&self, tier: Tier) -> u64;
}

/// The default formula: 0 at tier 0, otherwise `2^(tier - 1)`.
///
/// Defined over the registry's exposed tier range; at the nominal maximum
/// tier of 7 the power is 64.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExponentialPower;

impl VotingPowerFormula for ExponentialPower {
    fn power_of(&self, tier: Tier) -> u64 {
        if tier.is_none() {
            return 0;
        }
        1u64 << (tier.get() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExponentialPower, VotingPowerFormula};
    use laurel_types::Tier;

    #[test]
    fn default_formula_doubles_per_tier() {
        let formula = ExponentialPower;
        assert_eq!(formula.power_of(Tier::NONE), 0);
        for (tier, expected) in [(1, 1), (2, 2), (3, 4), (4, 8), (5, 16), (6, 32), (7, 64)] {
            assert_eq!(formula.power_of(Tier::new(tier)), expected);
        }
    }
}
