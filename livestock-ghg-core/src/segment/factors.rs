//! Emission factor sources for the segment calculators.

use crate::categories::{ProductionSystem, Subcategory};
use crate::errors::LivestockResult;
use crate::parameters::{BaselineFactors, ManureFactors, SegmentFactorTable};
use std::fmt::Debug;

/// Source of emission factors for a (subcategory, production system) segment.
///
/// Implementations are serialised with `typetag` so a configuration file can pick
/// either the full grid or the subcategory-only baseline table.
#[typetag::serde]
pub trait SegmentEmissionFactors: Debug + Send + Sync {
    /// Enteric CH4 emission factor (kg CH4 / head / yr)
    fn enteric_ef(&self, sub: Subcategory, sys: ProductionSystem) -> f64;

    /// Manure CH4 and N2O-N emission factors (kg / head / yr)
    fn manure_ef(&self, sub: Subcategory, sys: ProductionSystem) -> ManureFactors;

    /// Check that every factor the source can return is usable.
    fn validate(&self) -> LivestockResult<()>;
}

#[typetag::serde]
impl SegmentEmissionFactors for SegmentFactorTable {
    fn enteric_ef(&self, sub: Subcategory, sys: ProductionSystem) -> f64 {
        SegmentFactorTable::enteric_ef(self, sub, sys)
    }

    fn manure_ef(&self, sub: Subcategory, sys: ProductionSystem) -> ManureFactors {
        SegmentFactorTable::manure_ef(self, sub, sys)
    }

    fn validate(&self) -> LivestockResult<()> {
        SegmentFactorTable::validate(self)
    }
}

/// The baseline table ignores the production system.
#[typetag::serde]
impl SegmentEmissionFactors for BaselineFactors {
    fn enteric_ef(&self, sub: Subcategory, _sys: ProductionSystem) -> f64 {
        self.enteric[sub]
    }

    fn manure_ef(&self, sub: Subcategory, _sys: ProductionSystem) -> ManureFactors {
        ManureFactors {
            ch4: self.manure_ch4[sub],
            n2o_direct: self.manure_n2o_direct[sub],
            n2o_indirect: self.manure_n2o_indirect[sub],
        }
    }

    fn validate(&self) -> LivestockResult<()> {
        BaselineFactors::validate(self)
    }
}
