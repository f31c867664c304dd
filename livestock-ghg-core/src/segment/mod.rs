//! Segment-driven enteric and manure calculators.
//!
//! This path recomputes emissions directly from (subcategory, system, population)
//! segments. It differs from the baseline/mitigation pipeline in two ways:
//!
//! 1. Emission factors are looked up by both subcategory and production system
//!    through a [`SegmentEmissionFactors`] source, and a segment may override them.
//! 2. Mitigations are composed as two independent cumulative products instead of a
//!    sequential fold:
//!    - $F_{ef} = \prod_{ef} (1 - r \cdot c)$ scales every segment's emission factor
//!      before aggregation
//!    - $F_{em} = \prod_{emission} (1 - r \cdot c)$ scales the aggregated totals
//!
//! Nothing is rounded here; rounding happens where the figures are published.

mod enteric;
mod factors;
mod manure;

pub use enteric::EntericEmission;
pub use factors::SegmentEmissionFactors;
pub use manure::ManureEmission;

use crate::categories::{ProductionSystem, Subcategory};
use crate::errors::LivestockResult;
use crate::mitigation::{MitigationActionDefinition, MitigationType};
use crate::parameters::{GlobalWarmingPotentials, ManureFactors, SegmentFactorTable};
use crate::rounding::clamp01;
use serde::{Deserialize, Serialize};

/// A population slice with an optional emission factor override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "subcat")]
    pub subcategory: Subcategory,
    pub system: ProductionSystem,
    #[serde(rename = "pop")]
    pub population: f64,
    /// Replaces the enteric EF of the factor source for this segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enteric_ef: Option<f64>,
    /// Replaces the manure EFs of the factor source for this segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manure_ef: Option<ManureFactors>,
}

impl Segment {
    pub fn new(subcategory: Subcategory, system: ProductionSystem, population: f64) -> Self {
        Self {
            subcategory,
            system,
            population,
            enteric_ef: None,
            manure_ef: None,
        }
    }
}

/// A mitigation already selected for one target, with its coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentMitigation {
    #[serde(rename = "type")]
    pub kind: MitigationType,
    pub rate: f64,
    pub coverage: f64,
}

impl SegmentMitigation {
    pub fn new(kind: MitigationType, rate: f64, coverage: f64) -> Self {
        Self {
            kind,
            rate,
            coverage,
        }
    }

    pub fn from_definition(definition: &MitigationActionDefinition, coverage: f64) -> Self {
        Self::new(definition.kind, definition.rate, coverage)
    }

    fn factor(&self) -> f64 {
        1.0 - self.rate * clamp01(self.coverage)
    }
}

/// The two combined multipliers of a mitigation list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MitigationFactors {
    /// Applied to each segment's emission factor
    pub ef: f64,
    /// Applied to the aggregated emission totals
    pub emission: f64,
}

/// Combine mitigations into independent EF and emission products.
pub fn combine_mitigations(mitigations: &[SegmentMitigation]) -> MitigationFactors {
    mitigations.iter().fold(
        MitigationFactors {
            ef: 1.0,
            emission: 1.0,
        },
        |acc, m| match m.kind {
            MitigationType::Ef => MitigationFactors {
                ef: acc.ef * m.factor(),
                ..acc
            },
            MitigationType::Emission => MitigationFactors {
                emission: acc.emission * m.factor(),
                ..acc
            },
        },
    )
}

/// Segment calculator: an emission factor source plus GWP constants.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentCalculator {
    factors: Box<dyn SegmentEmissionFactors>,
    #[serde(default)]
    gwp: GlobalWarmingPotentials,
}

impl SegmentCalculator {
    pub fn new(factors: Box<dyn SegmentEmissionFactors>, gwp: GlobalWarmingPotentials) -> Self {
        Self { factors, gwp }
    }

    pub fn gwp(&self) -> &GlobalWarmingPotentials {
        &self.gwp
    }

    pub fn factors(&self) -> &dyn SegmentEmissionFactors {
        self.factors.as_ref()
    }

    /// Validate the factor source and GWP constants.
    pub fn validate(&self) -> LivestockResult<()> {
        self.factors.validate().map_err(|e| e.within("factors"))?;
        self.gwp.validate().map_err(|e| e.within("gwp"))
    }

    fn enteric_ef(&self, segment: &Segment) -> f64 {
        segment
            .enteric_ef
            .unwrap_or_else(|| self.factors.enteric_ef(segment.subcategory, segment.system))
    }

    fn manure_ef(&self, segment: &Segment) -> ManureFactors {
        segment
            .manure_ef
            .unwrap_or_else(|| self.factors.manure_ef(segment.subcategory, segment.system))
    }
}

impl Default for SegmentCalculator {
    fn default() -> Self {
        Self::new(
            Box::new(SegmentFactorTable::default()),
            GlobalWarmingPotentials::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_empty() {
        let factors = combine_mitigations(&[]);
        assert_eq!(factors.ef, 1.0);
        assert_eq!(factors.emission, 1.0);
    }

    #[test]
    fn test_combine_splits_by_type() {
        let factors = combine_mitigations(&[
            SegmentMitigation::new(MitigationType::Ef, 0.5, 1.0),
            SegmentMitigation::new(MitigationType::Emission, 0.2, 0.5),
            SegmentMitigation::new(MitigationType::Ef, 0.5, 1.0),
        ]);
        assert_eq!(factors.ef, 0.25);
        assert_eq!(factors.emission, 0.9);
    }

    #[test]
    fn test_combine_clamps_coverage() {
        let factors = combine_mitigations(&[SegmentMitigation::new(MitigationType::Ef, 0.4, 2.0)]);
        assert_eq!(factors.ef, 0.6);
    }

    #[test]
    fn test_segment_serde_shape() {
        let segment: Segment =
            serde_json::from_str(r#"{"subcat": "young", "system": "intensive", "pop": 12.5}"#)
                .unwrap();
        assert_eq!(segment, Segment::new(Subcategory::Young, ProductionSystem::Intensive, 12.5));
    }

    #[test]
    fn test_calculator_toml_round_trip() {
        let calculator = SegmentCalculator::default();
        let serialised = toml::to_string(&calculator).unwrap();
        let deserialised: SegmentCalculator = toml::from_str(&serialised).unwrap();

        for sub in Subcategory::ALL {
            for sys in ProductionSystem::ALL {
                assert_eq!(
                    calculator.factors().enteric_ef(sub, sys),
                    deserialised.factors().enteric_ef(sub, sys)
                );
            }
        }
        assert_eq!(calculator.gwp(), deserialised.gwp());
    }

    #[test]
    fn test_calculator_validate_prefixes_section() {
        assert!(SegmentCalculator::default().validate().is_ok());

        let mut table = SegmentFactorTable::default();
        table.enteric.weaning.intensive = -1.0;
        let calculator =
            SegmentCalculator::new(Box::new(table), GlobalWarmingPotentials::default());
        let err = calculator.validate().unwrap_err();
        assert!(err.to_string().contains("factors.enteric.weaning.intensive"));

        let calculator = SegmentCalculator::new(
            Box::new(SegmentFactorTable::default()),
            GlobalWarmingPotentials {
                ch4: 0.0,
                ..Default::default()
            },
        );
        let err = calculator.validate().unwrap_err();
        assert!(err.to_string().contains("gwp.ch4"));
    }
}
