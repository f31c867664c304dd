//! The primary calculation pipeline.
//!
//! Distributor -> baseline calculator -> mitigation applier -> summary builder.

use crate::baseline::{calculate_baseline_emissions, BaselineEmission};
use crate::distribution::{distribute_population, DistributionResult};
use crate::mitigation::{apply_mitigations, MitigationCatalog, MitigationInput};
use crate::parameters::{BaselineFactors, DistributionShares};
use crate::summary::{build_summary, SummaryResult};
use serde::{Deserialize, Serialize};

/// Every intermediate value of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub distribution: DistributionResult,
    pub baseline: BaselineEmission,
    pub mitigated: BaselineEmission,
    pub summary: SummaryResult,
}

/// Run the full pipeline for one population figure.
pub fn calculate(
    total_population: f64,
    shares: &DistributionShares,
    factors: &BaselineFactors,
    mitigations: &[MitigationInput],
    catalog: &MitigationCatalog,
) -> PipelineResult {
    let distribution = distribute_population(total_population, shares);
    let baseline = calculate_baseline_emissions(&distribution, factors);
    let mitigated = apply_mitigations(&baseline, mitigations, catalog, factors.gwp.ch4);
    let summary = build_summary(&baseline, &mitigated);

    PipelineResult {
        distribution,
        baseline,
        mitigated,
        summary,
    }
}
