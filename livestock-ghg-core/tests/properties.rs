//! Invariants of the emissions pipeline.
//!
//! These tests exercise the public API across modules:
//! - Population conservation in the distributor
//! - Determinism of the rounded baseline
//! - Monotonicity and ordering of the mitigation fold
//! - The structural difference between the fold and the segment products

use approx::assert_relative_eq;
use livestock_ghg_core::baseline::{calculate_baseline_emissions, BaselineEmission};
use livestock_ghg_core::categories::{PerSubcategory, PerSystem, ProductionSystem, Subcategory};
use livestock_ghg_core::distribution::distribute_population;
use livestock_ghg_core::mitigation::{
    apply_mitigations, MitigationActionDefinition, MitigationCatalog, MitigationInput,
    MitigationTarget, MitigationType,
};
use livestock_ghg_core::parameters::{BaselineFactors, DistributionShares};
use livestock_ghg_core::rounding::round2;
use livestock_ghg_core::segment::{Segment, SegmentCalculator, SegmentMitigation};
use livestock_ghg_core::summary::build_summary;

fn catalog() -> MitigationCatalog {
    MitigationCatalog::from_iter([
        (
            "enteric_ef",
            MitigationActionDefinition::new(
                "Improved forage",
                MitigationTarget::Enteric,
                MitigationType::Ef,
                0.3,
            ),
        ),
        (
            "enteric_emission",
            MitigationActionDefinition::new(
                "Feed additive",
                MitigationTarget::Enteric,
                MitigationType::Emission,
                0.5,
            ),
        ),
        (
            "manure_a",
            MitigationActionDefinition::new(
                "Biogas digester",
                MitigationTarget::Manure,
                MitigationType::Emission,
                0.5,
            ),
        ),
        (
            "manure_b",
            MitigationActionDefinition::new(
                "Composting",
                MitigationTarget::Manure,
                MitigationType::Ef,
                0.5,
            ),
        ),
    ])
}

mod distribution_conservation {
    use super::*;

    /// Normalised shares redistribute the whole herd.
    #[test]
    fn test_normalised_shares_conserve_population() {
        let shares = DistributionShares::default();
        for population in [0.0, 1.0, 999.0, 1.0e6, 3_456_789.5] {
            let result = distribute_population(population, &shares);
            assert_relative_eq!(result.total(), population, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_uniform_shares() {
        let shares = DistributionShares::new(
            PerSubcategory::from_fn(|_| 1.0 / 6.0),
            PerSystem::from_fn(|_| 1.0 / 3.0),
        );
        let result = distribute_population(1800.0, &shares);
        for (_, _, pop) in result.cells() {
            assert_relative_eq!(pop, 100.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_single_subcategory_and_system() {
        let mut shares = DistributionShares::new(PerSubcategory::default(), PerSystem::default());
        shares.subcategories.weaning = 1.0;
        shares.systems.extensive = 1.0;

        let result = distribute_population(1000.0, &shares);
        assert_eq!(result.get(Subcategory::Weaning, ProductionSystem::Extensive), 1000.0);
        assert_eq!(result.total(), 1000.0);
    }
}

mod baseline_determinism {
    use super::*;

    #[test]
    fn test_identical_inputs_identical_output() {
        let shares = DistributionShares::default();
        let factors = BaselineFactors::default();
        let first =
            calculate_baseline_emissions(&distribute_population(54_321.0, &shares), &factors);
        let second =
            calculate_baseline_emissions(&distribute_population(54_321.0, &shares), &factors);
        assert_eq!(first, second);
    }
}

mod mitigation_fold {
    use super::*;

    fn baseline() -> BaselineEmission {
        BaselineEmission {
            enteric_ch4_ton: 10.0,
            enteric_co2e_ton: 280.0,
            manure_ch4_ton: 100.0,
            manure_ch4_co2e_ton: 2800.0,
            manure_n2o_direct_co2e_ton: 40.0,
            manure_n2o_indirect_co2e_ton: 8.0,
        }
    }

    #[test]
    fn test_single_mitigation_strictly_reduces_target() {
        let b = baseline();
        let catalog = catalog();
        for (id, _) in catalog.iter() {
            let result = apply_mitigations(&b, &[MitigationInput::new(id, 0.8)], &catalog, 28.0);
            let target = catalog.get(id).unwrap().target;
            match target {
                MitigationTarget::Enteric => {
                    assert!(result.enteric_ch4_ton < b.enteric_ch4_ton, "{id}")
                }
                MitigationTarget::Manure => {
                    assert!(result.manure_ch4_ton < b.manure_ch4_ton, "{id}");
                    assert!(result.manure_n2o_direct_co2e_ton < b.manure_n2o_direct_co2e_ton);
                }
            }
        }
    }

    #[test]
    fn test_unknown_action_leaves_snapshot_unchanged() {
        let b = baseline();
        let result = apply_mitigations(
            &b,
            &[MitigationInput::new("nonexistent", 0.5)],
            &MitigationCatalog::new(),
            28.0,
        );
        assert_eq!(result, b);
    }

    #[test]
    fn test_enteric_emission_round_trip() {
        let result = apply_mitigations(
            &baseline(),
            &[MitigationInput::new("enteric_emission", 1.0)],
            &catalog(),
            28.0,
        );
        assert_eq!(result.enteric_ch4_ton, round2((10.0 * 28.0 * 0.5) / 28.0));
        assert_eq!(result.enteric_ch4_ton, 5.0);
    }

    #[test]
    fn test_sequential_manure_fold() {
        let result = apply_mitigations(
            &baseline(),
            &[
                MitigationInput::new("manure_a", 1.0),
                MitigationInput::new("manure_b", 1.0),
            ],
            &catalog(),
            28.0,
        );
        assert_eq!(result.manure_ch4_ton, round2(round2(100.0 * 0.5) * 0.5));
        assert_eq!(result.manure_ch4_ton, 25.0);
    }

    #[test]
    fn test_fold_rounds_intermediate_values() {
        // 0.13 * 0.5 = 0.065 -> 0.07, then 0.07 * 0.5 = 0.035 -> 0.04.
        // A combined product would give round2(0.13 * 0.25) = round2(0.0325) = 0.03.
        let mut b = baseline();
        b.manure_n2o_indirect_co2e_ton = 0.13;
        let result = apply_mitigations(
            &b,
            &[
                MitigationInput::new("manure_a", 1.0),
                MitigationInput::new("manure_b", 1.0),
            ],
            &catalog(),
            28.0,
        );
        let folded = round2(round2(0.13 * 0.5) * 0.5);
        assert_eq!(result.manure_n2o_indirect_co2e_ton, folded);
        assert_ne!(folded, round2(0.13 * 0.25));
    }

    #[test]
    fn test_order_does_not_matter_for_exact_factors() {
        let forward = apply_mitigations(
            &baseline(),
            &[
                MitigationInput::new("enteric_ef", 1.0),
                MitigationInput::new("enteric_emission", 1.0),
            ],
            &catalog(),
            28.0,
        );
        let reverse = apply_mitigations(
            &baseline(),
            &[
                MitigationInput::new("enteric_emission", 1.0),
                MitigationInput::new("enteric_ef", 1.0),
            ],
            &catalog(),
            28.0,
        );
        // 10 * 0.7 = 7 -> 3.5 ; 10 * 0.5 = 5 -> 3.5
        assert_eq!(forward.enteric_ch4_ton, 3.5);
        assert_eq!(reverse.enteric_ch4_ton, 3.5);
    }
}

mod summary_guard {
    use super::*;

    #[test]
    fn test_zero_baseline_percent_is_zero() {
        let zero = BaselineEmission::default();
        let summary = build_summary(&zero, &zero);
        assert_eq!(summary.percent, 0.0);
    }

    #[test]
    fn test_full_pipeline_summary_matches_snapshots() {
        let shares = DistributionShares::default();
        let factors = BaselineFactors::default();
        let baseline =
            calculate_baseline_emissions(&distribute_population(25_000.0, &shares), &factors);
        let mitigated = apply_mitigations(
            &baseline,
            &[MitigationInput::new("enteric_ef", 0.5)],
            &catalog(),
            factors.gwp.ch4,
        );
        let summary = build_summary(&baseline, &mitigated);
        assert_eq!(summary.baseline_total, round2(baseline.total_co2e_ton()));
        assert_relative_eq!(
            summary.reduction,
            baseline.total_co2e_ton() - mitigated.total_co2e_ton(),
            epsilon = 0.011
        );
    }
}

mod segment_path {
    use super::*;

    /// With the baseline table as factor source the segment path reproduces the
    /// baseline up to its 2-decimal rounding.
    #[test]
    fn test_segment_path_agrees_with_pipeline_without_rounding() {
        let shares = DistributionShares::default();
        let factors = BaselineFactors::default();
        let distribution = distribute_population(10_000.0, &shares);
        let baseline = calculate_baseline_emissions(&distribution, &factors);

        let segments: Vec<Segment> = distribution
            .cells()
            .map(|(sub, sys, pop)| Segment::new(sub, sys, pop))
            .collect();
        let calculator = SegmentCalculator::new(Box::new(factors.clone()), factors.gwp);
        let enteric = calculator.compute_enteric(&segments, &[]);

        assert_relative_eq!(enteric.ch4_ton, baseline.enteric_ch4_ton, epsilon = 0.006);
    }

    #[test]
    fn test_segment_products_are_order_independent() {
        let segments = [Segment::new(Subcategory::Young, ProductionSystem::Extensive, 333.0)];
        let calculator = SegmentCalculator::default();
        let a = SegmentMitigation::new(MitigationType::Ef, 0.3, 0.9);
        let b = SegmentMitigation::new(MitigationType::Emission, 0.2, 0.4);
        let forward = calculator.compute_manure(&segments, &[a, b]);
        let reverse = calculator.compute_manure(&segments, &[b, a]);
        assert_relative_eq!(forward.total_co2e_ton, reverse.total_co2e_ton);
    }
}
