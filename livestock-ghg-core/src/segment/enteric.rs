//! Enteric fermentation segment calculator.

use super::{combine_mitigations, Segment, SegmentCalculator, SegmentMitigation};
use crate::units::{kg_to_ton, to_co2e, ton_to_gg};
use serde::{Deserialize, Serialize};

/// Enteric CH4 emission of a set of segments (unrounded).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntericEmission {
    /// unit: t CH4 / yr
    #[serde(rename = "CH4_ton")]
    pub ch4_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "CH4_CO2e_ton")]
    pub ch4_co2e_ton: f64,
    /// unit: Gg CO2e / yr
    #[serde(rename = "CH4_GgCO2e")]
    pub ch4_gg_co2e: f64,
}

impl SegmentCalculator {
    /// Compute enteric CH4 for `segments` under enteric `mitigations`.
    ///
    /// $$E = \frac{F_{em}}{1000} \sum_i N_i \cdot EF_i \cdot F_{ef}$$
    pub fn compute_enteric(
        &self,
        segments: &[Segment],
        mitigations: &[SegmentMitigation],
    ) -> EntericEmission {
        let factors = combine_mitigations(mitigations);

        let ch4_kg: f64 = segments
            .iter()
            .map(|segment| segment.population * self.enteric_ef(segment) * factors.ef)
            .sum();

        let ch4_ton = kg_to_ton(ch4_kg) * factors.emission;
        let ch4_co2e_ton = to_co2e(ch4_ton, self.gwp.ch4);

        EntericEmission {
            ch4_ton,
            ch4_co2e_ton,
            ch4_gg_co2e: ton_to_gg(ch4_co2e_ton),
        }
    }
}
