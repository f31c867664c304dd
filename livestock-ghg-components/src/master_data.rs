//! Master data: the configuration every calculation reads.
//!
//! A TOML document may override any section; sections that are absent keep the
//! hardcoded defaults.
//!
//! ```toml
//! [shares.systems]
//! extensive = 0.7
//! semi_intensive = 0.2
//! intensive = 0.1
//!
//! [factors.gwp]
//! ch4 = 27.0
//!
//! [mitigations.silage]
//! name = "Silage feeding"
//! target = "enteric"
//! type = "ef"
//! rate = 0.08
//! ```

use crate::ingest::{check_fraction, warn_if_unnormalised};
use crate::mitigation_config::{fallback_catalog, merge_province, FeedCorrectionFactor};
use livestock_ghg_core::errors::{LivestockError, LivestockResult};
use livestock_ghg_core::mitigation::MitigationCatalog;
use livestock_ghg_core::parameters::{BaselineFactors, DistributionShares};
use livestock_ghg_core::segment::SegmentCalculator;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shares, factors and mitigation definitions used by both submission flows.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterData {
    /// Population split used by both flows
    pub shares: DistributionShares,
    /// Per-subcategory factors of the primary pipeline
    pub factors: BaselineFactors,
    /// Factor source and GWP constants of the segment flow
    pub segment: SegmentCalculator,
    /// Mitigation table used when no province data applies
    pub mitigations: MitigationCatalog,
}

impl Default for MasterData {
    fn default() -> Self {
        Self {
            shares: DistributionShares::default(),
            factors: BaselineFactors::default(),
            segment: SegmentCalculator::default(),
            mitigations: fallback_catalog(),
        }
    }
}

impl MasterData {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> LivestockResult<Self> {
        let data: MasterData = toml::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> LivestockResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> LivestockResult<String> {
        toml::to_string(self).map_err(|e| LivestockError::Error(e.to_string()))
    }

    /// Check value ranges.
    ///
    /// Shares and mitigation rates must be fractions. Factors of both flows must be
    /// finite and non-negative, the CH4 GWP positive. Unnormalised shares only log
    /// a warning.
    pub fn validate(&self) -> LivestockResult<()> {
        for (sub, share) in self.shares.subcategories.iter() {
            check_fraction(&format!("shares.subcategories.{sub}"), *share)?;
        }
        for (sys, share) in self.shares.systems.iter() {
            check_fraction(&format!("shares.systems.{sys}"), *share)?;
        }
        warn_if_unnormalised(&self.shares);

        self.factors.validate().map_err(|e| e.within("factors"))?;
        self.segment.validate().map_err(|e| e.within("segment"))?;

        for (id, definition) in self.mitigations.iter() {
            check_fraction(&format!("mitigations.{id}.rate"), definition.rate)?;
        }
        Ok(())
    }

    /// Mitigation catalog for `province`: the configured table merged with the
    /// province's feed correction factors.
    pub fn catalog_for(
        &self,
        province: &str,
        feed_rows: &[FeedCorrectionFactor],
    ) -> MitigationCatalog {
        merge_province(self.mitigations.clone(), province, feed_rows)
    }
}
