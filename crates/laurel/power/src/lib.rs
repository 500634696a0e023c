//! Tier-derived voting power aggregation.
//!
//! This crate provides:
//! - the [`VotingPowerFormula`] seam with the default [`ExponentialPower`]
//! - [`VotingPowerEngine`], which enumerates a principal's holdings through
//!   an ownership oracle and sums the formula over each entity's tier

pub mod engine;
pub mod error;
pub mod formula;

pub use engine::{EngineBindings, VotingPowerEngine};
pub use error::EngineError;
pub use formula::{ExponentialPower, VotingPowerFormula};
