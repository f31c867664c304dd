//! Collaborators of the livestock emissions core.
//!
//! Everything that sits between raw configuration/requests and the pure
//! calculations in `livestock_ghg_core`:
//!
//! - `master_data`: default shares, factors and mitigation table, TOML loading
//! - `ingest`: validation boundary for loosely typed JSON rows
//! - `mitigation_config`: fallback and province-specific mitigation catalogs
//! - `compute`: segment-based submission flow
//! - `submission`: calculation requests and the approval workflow

pub mod compute;
pub mod ingest;
pub mod master_data;
pub mod mitigation_config;
pub mod submission;
