//! Manure management segment calculator.

use super::{combine_mitigations, Segment, SegmentCalculator, SegmentMitigation};
use crate::units::{kg_to_ton, n2o_kg_to_co2e_ton, to_co2e, ton_to_gg};
use serde::{Deserialize, Serialize};

/// Manure CH4 and N2O emission of a set of segments (unrounded).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManureEmission {
    /// unit: t CH4 / yr
    #[serde(rename = "CH4_ton")]
    pub ch4_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "CH4_CO2e_ton")]
    pub ch4_co2e_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "N2O_direct_CO2e_ton")]
    pub n2o_direct_co2e_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "N2O_indirect_CO2e_ton")]
    pub n2o_indirect_co2e_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "total_CO2e_ton")]
    pub total_co2e_ton: f64,
    /// unit: Gg CO2e / yr
    #[serde(rename = "total_GgCO2e")]
    pub total_gg_co2e: f64,
}

impl SegmentCalculator {
    /// Compute manure CH4 and N2O for `segments` under manure `mitigations`.
    ///
    /// The EF product scales all three factors of every segment; the emission
    /// product scales the three aggregated pollutant totals.
    pub fn compute_manure(
        &self,
        segments: &[Segment],
        mitigations: &[SegmentMitigation],
    ) -> ManureEmission {
        let factors = combine_mitigations(mitigations);

        let mut ch4_kg = 0.0;
        let mut n2o_direct_kg = 0.0;
        let mut n2o_indirect_kg = 0.0;
        for segment in segments {
            let ef = self.manure_ef(segment);
            ch4_kg += segment.population * ef.ch4 * factors.ef;
            n2o_direct_kg += segment.population * ef.n2o_direct * factors.ef;
            n2o_indirect_kg += segment.population * ef.n2o_indirect * factors.ef;
        }

        let gwp = &self.gwp;
        let ch4_ton = kg_to_ton(ch4_kg) * factors.emission;
        let n2o_direct_co2e_ton =
            n2o_kg_to_co2e_ton(n2o_direct_kg, gwp.n2o_conversion, gwp.n2o) * factors.emission;
        let n2o_indirect_co2e_ton =
            n2o_kg_to_co2e_ton(n2o_indirect_kg, gwp.n2o_conversion, gwp.n2o) * factors.emission;

        let ch4_co2e_ton = to_co2e(ch4_ton, gwp.ch4);
        let total_co2e_ton = ch4_co2e_ton + n2o_direct_co2e_ton + n2o_indirect_co2e_ton;

        ManureEmission {
            ch4_ton,
            ch4_co2e_ton,
            n2o_direct_co2e_ton,
            n2o_indirect_co2e_ton,
            total_co2e_ton,
            total_gg_co2e: ton_to_gg(total_co2e_ton),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{ProductionSystem, Subcategory};
    use crate::mitigation::MitigationType;
    use crate::parameters::{BaselineFactors, GlobalWarmingPotentials, ManureFactors};
    use is_close::is_close;

    fn calculator() -> SegmentCalculator {
        SegmentCalculator::new(
            Box::new(BaselineFactors::default()),
            GlobalWarmingPotentials::default(),
        )
    }

    fn override_segment(population: f64) -> Segment {
        Segment {
            manure_ef: Some(ManureFactors {
                ch4: 2.0,
                n2o_direct: 0.28,
                n2o_indirect: 0.028,
            }),
            ..Segment::new(Subcategory::Young, ProductionSystem::Intensive, population)
        }
    }

    #[test]
    fn test_manure_totals() {
        let result = calculator().compute_manure(&[override_segment(1000.0)], &[]);
        assert!(is_close!(result.ch4_ton, 2.0));
        assert!(is_close!(result.ch4_co2e_ton, 56.0));
        assert!(is_close!(result.n2o_direct_co2e_ton, 116.6));
        assert!(is_close!(result.n2o_indirect_co2e_ton, 11.66));
        assert!(is_close!(result.total_co2e_ton, 184.26));
        assert!(is_close!(result.total_gg_co2e, 0.18426));
    }

    #[test]
    fn test_emission_factor_applies_to_every_pollutant() {
        let baseline = calculator().compute_manure(&[override_segment(1000.0)], &[]);
        let mitigated = calculator().compute_manure(
            &[override_segment(1000.0)],
            &[SegmentMitigation::new(MitigationType::Emission, 0.4, 1.0)],
        );
        assert!(is_close!(mitigated.ch4_ton, baseline.ch4_ton * 0.6));
        assert!(is_close!(mitigated.n2o_direct_co2e_ton, baseline.n2o_direct_co2e_ton * 0.6));
        assert!(is_close!(
            mitigated.n2o_indirect_co2e_ton,
            baseline.n2o_indirect_co2e_ton * 0.6
        ));
        assert!(is_close!(mitigated.total_co2e_ton, baseline.total_co2e_ton * 0.6));
    }

    #[test]
    fn test_ef_and_emission_products_compose() {
        let baseline = calculator().compute_manure(&[override_segment(1000.0)], &[]);
        let mitigated = calculator().compute_manure(
            &[override_segment(1000.0)],
            &[
                SegmentMitigation::new(MitigationType::Ef, 0.5, 1.0),
                SegmentMitigation::new(MitigationType::Emission, 0.5, 1.0),
            ],
        );
        assert!(is_close!(mitigated.total_co2e_ton, baseline.total_co2e_ton * 0.25));
    }

    #[test]
    fn test_uses_factor_source_without_override() {
        let segment = Segment::new(Subcategory::AdultMale, ProductionSystem::Extensive, 1000.0);
        let result = calculator().compute_manure(&[segment], &[]);
        // BaselineFactors default: 1.4 kg CH4 per adult male
        assert!(is_close!(result.ch4_ton, 1.4));
    }
}
