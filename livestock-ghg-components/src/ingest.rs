//! Validation boundary for raw configuration rows.
//!
//! Master data arrives as loosely typed JSON row arrays. Every row is checked and
//! converted into the strongly typed parameter structures before it can reach the
//! pipeline; the first invalid row aborts ingestion with an error naming its index.

use crate::mitigation_config::FeedCorrectionFactor;
use livestock_ghg_core::categories::{PerSubcategory, PerSystem, ProductionSystem, Subcategory};
pub use livestock_ghg_core::errors::check_non_negative;
use livestock_ghg_core::errors::{LivestockError, LivestockResult};
use livestock_ghg_core::mitigation::{
    MitigationActionDefinition, MitigationCatalog, MitigationTarget, MitigationType,
};
use livestock_ghg_core::parameters::{BaselineFactors, DistributionShares, GlobalWarmingPotentials};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Parse a JSON array of rows.
pub fn parse_rows<T: DeserializeOwned>(json: &str) -> LivestockResult<Vec<T>> {
    Ok(serde_json::from_str(json)?)
}

/// Check that `value` is a finite fraction in `[0, 1]`.
pub fn check_fraction(field: &str, value: f64) -> LivestockResult<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(LivestockError::fraction(field, value))
    }
}


fn row_error(row: usize, err: LivestockError) -> LivestockError {
    LivestockError::InvalidRow {
        row,
        reason: err.to_string(),
    }
}

/// Which share table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareAxis {
    Subcategory,
    System,
}

/// One row of a distribution share table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawShareRow {
    pub axis: ShareAxis,
    pub key: String,
    pub share: f64,
}

/// Build [`DistributionShares`] from share rows.
///
/// Keys not present default to 0. Later rows for the same key replace earlier
/// ones. Tables that do not sum to 1 are accepted with a warning.
pub fn shares_from_rows(rows: &[RawShareRow]) -> LivestockResult<DistributionShares> {
    let mut subcategories = PerSubcategory::<f64>::default();
    let mut systems = PerSystem::<f64>::default();

    for (index, row) in rows.iter().enumerate() {
        let share = check_fraction("share", row.share).map_err(|e| row_error(index, e))?;
        match row.axis {
            ShareAxis::Subcategory => {
                let sub: Subcategory = row.key.parse().map_err(|e| row_error(index, e))?;
                subcategories[sub] = share;
            }
            ShareAxis::System => {
                let sys: ProductionSystem = row.key.parse().map_err(|e| row_error(index, e))?;
                systems[sys] = share;
            }
        }
    }

    let shares = DistributionShares::new(subcategories, systems);
    warn_if_unnormalised(&shares);
    Ok(shares)
}

pub(crate) fn warn_if_unnormalised(shares: &DistributionShares) {
    if !shares.is_normalised() {
        warn!(
            subcategory_sum = shares.subcategories.sum(),
            system_sum = shares.systems.sum(),
            "Distribution shares do not sum to 1; head counts will be scaled"
        );
    }
}

/// One row of the emission factor table (one subcategory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFactorRow {
    pub subcategory: String,
    #[serde(default)]
    pub enteric: Option<f64>,
    #[serde(default)]
    pub manure_ch4: Option<f64>,
    #[serde(default)]
    pub n2o_direct: Option<f64>,
    #[serde(default)]
    pub n2o_indirect: Option<f64>,
}

/// Build [`BaselineFactors`] from factor rows. Missing factors are 0.
pub fn factors_from_rows(
    rows: &[RawFactorRow],
    gwp: GlobalWarmingPotentials,
) -> LivestockResult<BaselineFactors> {
    let mut factors = BaselineFactors {
        enteric: PerSubcategory::default(),
        manure_ch4: PerSubcategory::default(),
        manure_n2o_direct: PerSubcategory::default(),
        manure_n2o_indirect: PerSubcategory::default(),
        gwp,
    };

    for (index, row) in rows.iter().enumerate() {
        let sub: Subcategory = row.subcategory.parse().map_err(|e| row_error(index, e))?;
        let check = |field: &str, value: Option<f64>| {
            check_non_negative(field, value.unwrap_or(0.0)).map_err(|e| row_error(index, e))
        };
        factors.enteric[sub] = check("enteric", row.enteric)?;
        factors.manure_ch4[sub] = check("manureCh4", row.manure_ch4)?;
        factors.manure_n2o_direct[sub] = check("n2oDirect", row.n2o_direct)?;
        factors.manure_n2o_indirect[sub] = check("n2oIndirect", row.n2o_indirect)?;
    }

    Ok(factors)
}

/// One row of the mitigation action table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMitigationRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rate: f64,
}

fn parse_target(value: &str) -> LivestockResult<MitigationTarget> {
    match value.trim() {
        "enteric" => Ok(MitigationTarget::Enteric),
        "manure" => Ok(MitigationTarget::Manure),
        other => Err(LivestockError::UnknownVariant {
            kind: "mitigation target",
            value: other.to_string(),
        }),
    }
}

fn parse_kind(value: &str) -> LivestockResult<MitigationType> {
    match value.trim() {
        "ef" => Ok(MitigationType::Ef),
        "emission" => Ok(MitigationType::Emission),
        other => Err(LivestockError::UnknownVariant {
            kind: "mitigation type",
            value: other.to_string(),
        }),
    }
}

/// Build a [`MitigationCatalog`] from action rows.
pub fn catalog_from_rows(rows: &[RawMitigationRow]) -> LivestockResult<MitigationCatalog> {
    let mut catalog = MitigationCatalog::new();
    for (index, row) in rows.iter().enumerate() {
        let id = row.id.trim();
        if id.is_empty() {
            return Err(LivestockError::InvalidRow {
                row: index,
                reason: "empty mitigation id".to_string(),
            });
        }
        let target = parse_target(&row.target).map_err(|e| row_error(index, e))?;
        let kind = parse_kind(&row.kind).map_err(|e| row_error(index, e))?;
        let rate = check_fraction("rate", row.rate).map_err(|e| row_error(index, e))?;
        let name = row.name.clone().unwrap_or_else(|| id.to_string());
        catalog.insert(id, MitigationActionDefinition::new(name, target, kind, rate));
    }
    Ok(catalog)
}

/// One row of the feed correction factor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFeedCorrectionRow {
    pub province: String,
    pub feed_category: String,
    pub factor: f64,
}

/// Validate feed correction rows.
pub fn feed_corrections_from_rows(
    rows: &[RawFeedCorrectionRow],
) -> LivestockResult<Vec<FeedCorrectionFactor>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            if row.province.trim().is_empty() || row.feed_category.trim().is_empty() {
                return Err(LivestockError::InvalidRow {
                    row: index,
                    reason: "province and feed category are required".to_string(),
                });
            }
            let factor =
                check_non_negative("factor", row.factor).map_err(|e| row_error(index, e))?;
            Ok(FeedCorrectionFactor {
                province: row.province.trim().to_string(),
                feed_category: row.feed_category.trim().to_string(),
                factor,
            })
        })
        .collect()
}
