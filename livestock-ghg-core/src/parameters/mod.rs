//! Emission parameters
//!
//! Parameter structures consumed by the pipeline. Each struct provides defaults
//! matching the hardcoded master data (IPCC Tier 1 style factors for beef cattle,
//! AR5 global warming potentials) and deserialises with every field optional.

mod baseline_factors;
mod distribution_shares;
mod gwp;
mod segment_factors;

pub use baseline_factors::BaselineFactors;
pub use distribution_shares::DistributionShares;
pub use gwp::GlobalWarmingPotentials;
pub use segment_factors::{ManureFactors, SegmentFactorTable};
