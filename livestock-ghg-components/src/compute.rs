//! Segment-based submission flow.
//!
//! Builds segments from a population figure, resolves the submission's
//! mitigation inputs against a catalog, and runs the enteric and manure segment
//! calculators for the baseline (no mitigation) and mitigated cases. Gg figures
//! are rounded to 3 decimals here, at the publishing boundary.

use livestock_ghg_core::categories::{ProductionSystem, Subcategory};
use livestock_ghg_core::distribution::distribute_population;
use livestock_ghg_core::mitigation::{MitigationCatalog, MitigationInput, MitigationTarget};
use livestock_ghg_core::parameters::{DistributionShares, ManureFactors};
use livestock_ghg_core::rounding::round3;
use livestock_ghg_core::segment::{
    EntericEmission, ManureEmission, Segment, SegmentCalculator, SegmentMitigation,
};
use livestock_ghg_core::units::ton_to_gg;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Split `total_population` into segments, dropping empty cells.
pub fn build_segments(total_population: f64, shares: &DistributionShares) -> Vec<Segment> {
    distribute_population(total_population, shares)
        .cells()
        .filter(|(_, _, population)| *population != 0.0)
        .map(|(sub, sys, population)| Segment::new(sub, sys, population))
        .collect()
}

/// Emission factor override for one (subcategory, system) segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfOverride {
    pub subcategory: Subcategory,
    pub system: ProductionSystem,
    #[serde(default)]
    pub enteric: Option<f64>,
    #[serde(default)]
    pub manure: Option<ManureFactors>,
}

/// Attach overrides to matching segments. Overrides without a segment are ignored;
/// a later override for the same segment replaces the earlier one field by field.
pub fn apply_ef_overrides(segments: &mut [Segment], overrides: &[EfOverride]) {
    for ef_override in overrides {
        let matching = segments.iter_mut().find(|segment| {
            segment.subcategory == ef_override.subcategory && segment.system == ef_override.system
        });
        match matching {
            Some(segment) => {
                if let Some(enteric) = ef_override.enteric {
                    segment.enteric_ef = Some(enteric);
                }
                if let Some(manure) = ef_override.manure {
                    segment.manure_ef = Some(manure);
                }
            }
            None => debug!(
                subcategory = %ef_override.subcategory,
                system = %ef_override.system,
                "EF override has no matching segment"
            ),
        }
    }
}

/// Resolve mitigation inputs and split them by target as `(enteric, manure)`.
pub fn split_mitigations(
    inputs: &[MitigationInput],
    catalog: &MitigationCatalog,
) -> (Vec<SegmentMitigation>, Vec<SegmentMitigation>) {
    let mut enteric = Vec::new();
    let mut manure = Vec::new();
    for (definition, coverage) in catalog.resolve(inputs) {
        let mitigation = SegmentMitigation::from_definition(definition, coverage);
        match definition.target {
            MitigationTarget::Enteric => enteric.push(mitigation),
            MitigationTarget::Manure => manure.push(mitigation),
        }
    }
    (enteric, manure)
}

/// Enteric and manure emissions of one case, with Gg figures rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentTotals {
    pub enteric: EntericEmission,
    pub manure: ManureEmission,
    /// unit: Gg CO2e / yr
    #[serde(rename = "total_GgCO2e")]
    pub total_gg_co2e: f64,
}

impl SegmentTotals {
    fn publish(mut enteric: EntericEmission, mut manure: ManureEmission) -> Self {
        let total_gg_co2e = round3(ton_to_gg(enteric.ch4_co2e_ton + manure.total_co2e_ton));
        enteric.ch4_gg_co2e = round3(enteric.ch4_gg_co2e);
        manure.total_gg_co2e = round3(manure.total_gg_co2e);
        Self {
            enteric,
            manure,
            total_gg_co2e,
        }
    }
}

/// Result of the segment flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResult {
    pub segments: Vec<Segment>,
    pub baseline: SegmentTotals,
    pub mitigated: SegmentTotals,
    /// unit: Gg CO2e / yr
    #[serde(rename = "reduction_GgCO2e")]
    pub reduction_gg_co2e: f64,
    /// unit: %
    pub percent: f64,
}

/// Run the segment calculators for `segments` with and without mitigation.
pub fn compute_emissions(
    segments: Vec<Segment>,
    inputs: &[MitigationInput],
    catalog: &MitigationCatalog,
    calculator: &SegmentCalculator,
) -> ComputeResult {
    let (enteric_mitigations, manure_mitigations) = split_mitigations(inputs, catalog);

    let baseline_enteric = calculator.compute_enteric(&segments, &[]);
    let baseline_manure = calculator.compute_manure(&segments, &[]);
    let mitigated_enteric = calculator.compute_enteric(&segments, &enteric_mitigations);
    let mitigated_manure = calculator.compute_manure(&segments, &manure_mitigations);

    let baseline_ton = baseline_enteric.ch4_co2e_ton + baseline_manure.total_co2e_ton;
    let mitigated_ton = mitigated_enteric.ch4_co2e_ton + mitigated_manure.total_co2e_ton;
    let reduction_ton = baseline_ton - mitigated_ton;
    let percent = if baseline_ton > 0.0 {
        reduction_ton / baseline_ton * 100.0
    } else {
        0.0
    };

    ComputeResult {
        segments,
        baseline: SegmentTotals::publish(baseline_enteric, baseline_manure),
        mitigated: SegmentTotals::publish(mitigated_enteric, mitigated_manure),
        reduction_gg_co2e: round3(ton_to_gg(reduction_ton)),
        percent,
    }
}
