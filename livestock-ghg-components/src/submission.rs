//! Submissions and their approval workflow.
//!
//! A submission wraps one validated [`CalculationRequest`] with the result of
//! either calculation flow and moves through
//! `menunggu_verifikasi -> dalam_verifikasi -> {disetujui | ditolak}`.
//! Storage and authorisation of submissions live outside this crate.

use crate::compute::{
    apply_ef_overrides, build_segments, compute_emissions, ComputeResult, EfOverride,
};
use crate::master_data::MasterData;
use crate::mitigation_config::FeedCorrectionFactor;
use livestock_ghg_core::errors::{check_non_negative, LivestockError, LivestockResult};
use livestock_ghg_core::mitigation::MitigationInput;
use livestock_ghg_core::pipeline::{calculate, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Review state of a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    #[serde(rename = "menunggu_verifikasi")]
    AwaitingVerification,
    #[serde(rename = "dalam_verifikasi")]
    UnderVerification,
    #[serde(rename = "disetujui")]
    Approved,
    #[serde(rename = "ditolak")]
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::AwaitingVerification => "menunggu_verifikasi",
            SubmissionStatus::UnderVerification => "dalam_verifikasi",
            SubmissionStatus::Approved => "disetujui",
            SubmissionStatus::Rejected => "ditolak",
        }
    }

    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (
                SubmissionStatus::AwaitingVerification,
                SubmissionStatus::UnderVerification
            ) | (SubmissionStatus::UnderVerification, SubmissionStatus::Approved)
                | (SubmissionStatus::UnderVerification, SubmissionStatus::Rejected)
        )
    }

    /// Approved and rejected submissions accept no further transitions.
    pub fn is_final(&self) -> bool {
        matches!(self, SubmissionStatus::Approved | SubmissionStatus::Rejected)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub province: String,
    /// unit: head
    pub population: f64,
    #[serde(default)]
    pub mitigations: Vec<MitigationInput>,
    /// Only read by the segment flow
    #[serde(default)]
    pub ef_overrides: Vec<EfOverride>,
}

impl CalculationRequest {
    pub fn new(
        province: impl Into<String>,
        population: f64,
        mitigations: Vec<MitigationInput>,
    ) -> Self {
        Self {
            province: province.into(),
            population,
            mitigations,
            ef_overrides: Vec::new(),
        }
    }

    /// Reject requests the calculation would otherwise accept silently.
    pub fn validate(&self) -> LivestockResult<()> {
        check_non_negative("population", self.population)?;
        for input in &self.mitigations {
            if !(0.0..=1.0).contains(&input.coverage) {
                return Err(LivestockError::fraction(
                    format!("coverage of '{}'", input.action_id),
                    input.coverage,
                ));
            }
        }
        for ef_override in &self.ef_overrides {
            let section = format!("efOverrides.{}.{}", ef_override.subcategory, ef_override.system);
            if let Some(enteric) = ef_override.enteric {
                check_non_negative("enteric", enteric).map_err(|e| e.within(&section))?;
            }
            if let Some(manure) = ef_override.manure {
                for (name, value) in [
                    ("manure.ch4", manure.ch4),
                    ("manure.n2o_direct", manure.n2o_direct),
                    ("manure.n2o_indirect", manure.n2o_indirect),
                ] {
                    check_non_negative(name, value).map_err(|e| e.within(&section))?;
                }
            }
        }
        Ok(())
    }
}

/// Result of whichever flow evaluated the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum SubmissionResult {
    Pipeline(PipelineResult),
    Segments(ComputeResult),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub province: String,
    pub request: CalculationRequest,
    pub result: SubmissionResult,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
}

impl Submission {
    /// Validate `request` and evaluate it through the primary pipeline.
    ///
    /// The mitigation catalog is the master data table merged with the feed
    /// correction factors of the request's province.
    pub fn evaluate(
        id: impl Into<String>,
        request: CalculationRequest,
        master: &MasterData,
        feed_rows: &[FeedCorrectionFactor],
    ) -> LivestockResult<Self> {
        request.validate()?;
        let catalog = master.catalog_for(&request.province, feed_rows);
        let result = calculate(
            request.population,
            &master.shares,
            &master.factors,
            &request.mitigations,
            &catalog,
        );
        Ok(Self::new(id.into(), request, SubmissionResult::Pipeline(result)))
    }

    /// Validate `request` and evaluate it through the segment flow.
    pub fn evaluate_segments(
        id: impl Into<String>,
        request: CalculationRequest,
        master: &MasterData,
        feed_rows: &[FeedCorrectionFactor],
    ) -> LivestockResult<Self> {
        request.validate()?;
        let catalog = master.catalog_for(&request.province, feed_rows);
        let mut segments = build_segments(request.population, &master.shares);
        apply_ef_overrides(&mut segments, &request.ef_overrides);
        let result = compute_emissions(segments, &request.mitigations, &catalog, &master.segment);
        Ok(Self::new(id.into(), request, SubmissionResult::Segments(result)))
    }

    fn new(id: String, request: CalculationRequest, result: SubmissionResult) -> Self {
        Self {
            id,
            province: request.province.clone(),
            request,
            result,
            status: SubmissionStatus::default(),
            review_note: None,
        }
    }

    pub fn begin_verification(&mut self) -> LivestockResult<()> {
        self.transition(SubmissionStatus::UnderVerification)
    }

    pub fn approve(&mut self) -> LivestockResult<()> {
        self.transition(SubmissionStatus::Approved)
    }

    pub fn reject(&mut self, note: impl Into<String>) -> LivestockResult<()> {
        self.transition(SubmissionStatus::Rejected)?;
        self.review_note = Some(note.into());
        Ok(())
    }

    fn transition(&mut self, next: SubmissionStatus) -> LivestockResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(LivestockError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        info!(submission = %self.id, from = %self.status, to = %next, "Submission status changed");
        self.status = next;
        Ok(())
    }
}
