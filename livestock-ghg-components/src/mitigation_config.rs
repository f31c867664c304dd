//! Mitigation action configuration.
//!
//! The catalog used for a submission is the hardcoded fallback table merged with
//! definitions derived from the province's feed correction factors. A correction
//! factor `k` for a feed category becomes an enteric EF-type action with rate
//! `clamp01(1 - k)`; a factor at or above 1 therefore yields a zero-rate action.

use livestock_ghg_core::mitigation::{
    MitigationActionDefinition, MitigationCatalog, MitigationTarget, MitigationType,
};
use livestock_ghg_core::rounding::clamp01;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix of the ids of actions derived from feed correction factors.
pub const FEED_ACTION_PREFIX: &str = "feed_";

/// Enteric emission factor correction for one feed category in one province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedCorrectionFactor {
    pub province: String,
    pub feed_category: String,
    /// Multiplier on the enteric EF when the feed is used
    /// unit: dimensionless
    pub factor: f64,
}

/// The hardcoded mitigation table used when no province-specific data exists.
pub fn fallback_catalog() -> MitigationCatalog {
    MitigationCatalog::from_iter([
        (
            "improved_feed_quality",
            MitigationActionDefinition::new(
                "Improved feed quality",
                MitigationTarget::Enteric,
                MitigationType::Ef,
                0.12,
            ),
        ),
        (
            "feed_additive",
            MitigationActionDefinition::new(
                "Methane-inhibiting feed additive",
                MitigationTarget::Enteric,
                MitigationType::Emission,
                0.3,
            ),
        ),
        (
            "biogas_digester",
            MitigationActionDefinition::new(
                "Biogas digester",
                MitigationTarget::Manure,
                MitigationType::Emission,
                0.5,
            ),
        ),
        (
            "manure_composting",
            MitigationActionDefinition::new(
                "Manure composting",
                MitigationTarget::Manure,
                MitigationType::Ef,
                0.25,
            ),
        ),
        (
            "covered_storage",
            MitigationActionDefinition::new(
                "Covered manure storage",
                MitigationTarget::Manure,
                MitigationType::Ef,
                0.15,
            ),
        ),
    ])
}

/// Action id for a feed category: lowercase, non-alphanumerics collapsed to `_`.
pub fn feed_action_id(feed_category: &str) -> String {
    let slug = feed_category
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    format!("{FEED_ACTION_PREFIX}{slug}")
}

fn same_province(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Definitions derived from the feed correction factors of `province`.
pub fn dynamic_definitions(province: &str, rows: &[FeedCorrectionFactor]) -> MitigationCatalog {
    rows.iter()
        .filter(|row| same_province(&row.province, province))
        .map(|row| {
            let id = feed_action_id(&row.feed_category);
            let rate = clamp01(1.0 - row.factor);
            debug!(
                province = %province,
                action_id = %id,
                factor = row.factor,
                rate,
                "Derived mitigation from feed correction factor"
            );
            (
                id,
                MitigationActionDefinition::new(
                    format!("Feed: {}", row.feed_category.trim()),
                    MitigationTarget::Enteric,
                    MitigationType::Ef,
                    rate,
                ),
            )
        })
        .collect()
}

/// `base` merged with the province's dynamic definitions (dynamic ids win).
pub fn merge_province(
    mut base: MitigationCatalog,
    province: &str,
    rows: &[FeedCorrectionFactor],
) -> MitigationCatalog {
    base.merge(dynamic_definitions(province, rows));
    base
}

/// The fallback table merged with the province's dynamic definitions.
pub fn catalog_for_province(province: &str, rows: &[FeedCorrectionFactor]) -> MitigationCatalog {
    merge_province(fallback_catalog(), province, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FeedCorrectionFactor> {
        vec![
            FeedCorrectionFactor {
                province: "Jawa Timur".to_string(),
                feed_category: "Legume forage".to_string(),
                factor: 0.85,
            },
            FeedCorrectionFactor {
                province: "Jawa Timur".to_string(),
                feed_category: "Rice straw".to_string(),
                factor: 1.1,
            },
            FeedCorrectionFactor {
                province: "Bali".to_string(),
                feed_category: "Concentrate".to_string(),
                factor: 0.7,
            },
        ]
    }

    #[test]
    fn test_fallback_rates_are_fractions() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), 5);
        for (id, def) in catalog.iter() {
            assert!((0.0..=1.0).contains(&def.rate), "{id} rate out of range");
        }
    }

    #[test]
    fn test_feed_action_id() {
        assert_eq!(feed_action_id("Legume forage"), "feed_legume_forage");
        assert_eq!(feed_action_id("  Rice-straw (treated) "), "feed_rice_straw_treated");
    }

    #[test]
    fn test_dynamic_definitions_filter_province() {
        let catalog = dynamic_definitions("jawa timur", &rows());
        assert_eq!(catalog.len(), 2);
        let legume = catalog.get("feed_legume_forage").unwrap();
        assert!((legume.rate - 0.15).abs() < 1e-12);
        assert_eq!(legume.target, MitigationTarget::Enteric);
        assert_eq!(legume.kind, MitigationType::Ef);
    }

    #[test]
    fn test_rate_clamped() {
        let catalog = dynamic_definitions("Jawa Timur", &rows());
        // factor 1.1 would give a negative rate
        assert_eq!(catalog.get("feed_rice_straw").unwrap().rate, 0.0);
    }

    #[test]
    fn test_province_catalog_merges() {
        let catalog = catalog_for_province("Bali", &rows());
        assert_eq!(catalog.len(), 6);
        assert!(catalog.contains("biogas_digester"));
        assert!(catalog.contains("feed_concentrate"));
    }

    #[test]
    fn test_dynamic_wins_on_collision() {
        let rows = [FeedCorrectionFactor {
            province: "Bali".to_string(),
            feed_category: "additive".to_string(),
            factor: 0.6,
        }];
        // "feed_additive" exists in the fallback table
        let catalog = catalog_for_province("Bali", &rows);
        let def = catalog.get("feed_additive").unwrap();
        assert_eq!(def.kind, MitigationType::Ef);
        assert!((def.rate - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_province_is_fallback() {
        assert_eq!(catalog_for_province("Papua", &rows()), fallback_catalog());
    }
}
