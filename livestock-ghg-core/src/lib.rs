//! Livestock greenhouse-gas emissions
//!
//! Pure calculations for enteric fermentation and manure management emissions of a
//! livestock population, following the IPCC Tier 1 methodology, and for the effect
//! of mitigation actions on them.
//!
//! # Module Organisation
//!
//! - `categories`: subcategory and production system axes
//! - `parameters`: emission factors, distribution shares and GWP constants
//! - `distribution`: population distributor
//! - `baseline`: baseline emission calculator
//! - `mitigation`: mitigation definitions and the sequential mitigation applier
//! - `segment`: segment-driven enteric and manure calculators
//! - `summary`: summary builder
//! - `pipeline`: distributor -> baseline -> mitigation -> summary
//!
//! Every calculation is total: missing factors count as zero, unknown mitigation
//! ids are skipped and coverage is clamped. Validation belongs to the callers,
//! which report failures through [`errors::LivestockError`].

pub mod baseline;
pub mod categories;
pub mod distribution;
pub mod errors;
pub mod mitigation;
pub mod parameters;
pub mod pipeline;
pub mod rounding;
pub mod segment;
pub mod summary;
pub mod units;
