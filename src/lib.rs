//! Livestock greenhouse-gas emissions with mitigation scenarios.
//!
//! Facade over the workspace crates:
//!
//! - [`ghg_core`]: categories, parameters and the pure emission calculations
//! - [`components`]: master data, row ingestion, mitigation configuration and
//!   the submission flows built on the core
//!
//! ```
//! use livestock_ghg::prelude::*;
//!
//! let master = MasterData::default();
//! let request = CalculationRequest::new(
//!     "Bali",
//!     1_000.0,
//!     vec![MitigationInput::new("biogas_digester", 0.5)],
//! );
//! let submission = Submission::evaluate("bali-1", request, &master, &[]).unwrap();
//! assert_eq!(submission.status, SubmissionStatus::AwaitingVerification);
//! ```

pub use livestock_ghg_components as components;
pub use livestock_ghg_core as ghg_core;

pub mod prelude {
    pub use livestock_ghg_components::compute::{build_segments, compute_emissions};
    pub use livestock_ghg_components::master_data::MasterData;
    pub use livestock_ghg_components::mitigation_config::{
        catalog_for_province, fallback_catalog, FeedCorrectionFactor,
    };
    pub use livestock_ghg_components::submission::{
        CalculationRequest, Submission, SubmissionResult, SubmissionStatus,
    };
    pub use livestock_ghg_core::categories::{ProductionSystem, Subcategory};
    pub use livestock_ghg_core::errors::{LivestockError, LivestockResult};
    pub use livestock_ghg_core::mitigation::{
        MitigationActionDefinition, MitigationCatalog, MitigationInput, MitigationTarget,
        MitigationType,
    };
    pub use livestock_ghg_core::parameters::{
        BaselineFactors, DistributionShares, GlobalWarmingPotentials,
    };
    pub use livestock_ghg_core::pipeline::{calculate, PipelineResult};
    pub use livestock_ghg_core::segment::{Segment, SegmentCalculator};
}
