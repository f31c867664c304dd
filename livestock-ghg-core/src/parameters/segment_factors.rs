//! Segment emission factors
//!
//! Emission factors indexed by both subcategory and production system, used by the
//! segment calculators.

use crate::categories::{PerSubcategory, PerSystem, ProductionSystem, Subcategory};
use crate::errors::{check_non_negative, LivestockResult};
use crate::parameters::BaselineFactors;
use serde::{Deserialize, Serialize};

/// Manure emission factors for one segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManureFactors {
    /// unit: kg CH4 / head / yr
    pub ch4: f64,
    /// unit: kg N2O-N / head / yr
    pub n2o_direct: f64,
    /// unit: kg N2O-N / head / yr
    pub n2o_indirect: f64,
}

/// Emission factor grid over (subcategory, production system).
///
/// The default grid is derived from [`BaselineFactors::default`] by scaling each
/// pathway with a per-system multiplier: housed animals on intensive systems have
/// more manure handled in liquid/solid storage (higher manure CH4 and N2O) and
/// better feed digestibility (lower enteric CH4 per head).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentFactorTable {
    /// unit: kg CH4 / head / yr
    pub enteric: PerSubcategory<PerSystem<f64>>,
    /// unit: kg CH4 / head / yr
    pub manure_ch4: PerSubcategory<PerSystem<f64>>,
    /// unit: kg N2O-N / head / yr
    pub manure_n2o_direct: PerSubcategory<PerSystem<f64>>,
    /// unit: kg N2O-N / head / yr
    pub manure_n2o_indirect: PerSubcategory<PerSystem<f64>>,
}

impl SegmentFactorTable {
    /// Spread subcategory factors over systems using per-system multipliers.
    pub fn from_baseline(
        factors: &BaselineFactors,
        enteric_scale: PerSystem<f64>,
        manure_ch4_scale: PerSystem<f64>,
        n2o_scale: PerSystem<f64>,
    ) -> Self {
        let spread = |table: &PerSubcategory<f64>, scale: &PerSystem<f64>| {
            PerSubcategory::from_fn(|sub| PerSystem::from_fn(|sys| table[sub] * scale[sys]))
        };
        Self {
            enteric: spread(&factors.enteric, &enteric_scale),
            manure_ch4: spread(&factors.manure_ch4, &manure_ch4_scale),
            manure_n2o_direct: spread(&factors.manure_n2o_direct, &n2o_scale),
            manure_n2o_indirect: spread(&factors.manure_n2o_indirect, &n2o_scale),
        }
    }

    pub fn enteric_ef(&self, sub: Subcategory, sys: ProductionSystem) -> f64 {
        self.enteric[sub][sys]
    }

    pub fn manure_ef(&self, sub: Subcategory, sys: ProductionSystem) -> ManureFactors {
        ManureFactors {
            ch4: self.manure_ch4[sub][sys],
            n2o_direct: self.manure_n2o_direct[sub][sys],
            n2o_indirect: self.manure_n2o_indirect[sub][sys],
        }
    }

    /// Every cell of every grid must be finite and non-negative.
    pub fn validate(&self) -> LivestockResult<()> {
        for (name, grid) in [
            ("enteric", &self.enteric),
            ("manure_ch4", &self.manure_ch4),
            ("manure_n2o_direct", &self.manure_n2o_direct),
            ("manure_n2o_indirect", &self.manure_n2o_indirect),
        ] {
            for (sub, row) in grid.iter() {
                for (sys, value) in row.iter() {
                    check_non_negative(&format!("{name}.{sub}.{sys}"), *value)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for SegmentFactorTable {
    fn default() -> Self {
        Self::from_baseline(
            &BaselineFactors::default(),
            PerSystem {
                extensive: 1.0,
                semi_intensive: 0.95,
                intensive: 0.9,
            },
            PerSystem {
                extensive: 0.6,
                semi_intensive: 1.0,
                intensive: 1.5,
            },
            PerSystem {
                extensive: 0.8,
                semi_intensive: 1.0,
                intensive: 1.3,
            },
        )
    }
}
