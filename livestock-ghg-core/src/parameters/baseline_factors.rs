//! Baseline emission factors
//!
//! Per-subcategory emission factors for the primary pipeline. The baseline path
//! does not distinguish production systems: every system of a subcategory uses
//! the same factor.

use crate::categories::PerSubcategory;
use crate::errors::{check_non_negative, LivestockResult};
use crate::parameters::GlobalWarmingPotentials;
use serde::{Deserialize, Serialize};

/// Emission factors for the four emission pathways plus GWP constants.
///
/// All factors are expressed in kg of gas per head per year. N2O factors are in
/// kg N2O-N and are converted with [`GlobalWarmingPotentials::n2o_conversion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineFactors {
    /// Enteric fermentation CH4 emission factor
    /// unit: kg CH4 / head / yr
    pub enteric: PerSubcategory<f64>,

    /// Manure management CH4 emission factor
    /// unit: kg CH4 / head / yr
    pub manure_ch4: PerSubcategory<f64>,

    /// Direct N2O emission factor from manure management
    /// unit: kg N2O-N / head / yr
    pub manure_n2o_direct: PerSubcategory<f64>,

    /// Indirect N2O emission factor (volatilisation and leaching)
    /// unit: kg N2O-N / head / yr
    pub manure_n2o_indirect: PerSubcategory<f64>,

    pub gwp: GlobalWarmingPotentials,
}

impl Default for BaselineFactors {
    fn default() -> Self {
        Self {
            enteric: PerSubcategory {
                weaning: 14.0,
                yearling: 27.0,
                young: 36.0,
                adult_male: 52.0,
                adult_female: 47.0,
                imported: 58.0,
            },
            manure_ch4: PerSubcategory {
                weaning: 0.4,
                yearling: 0.75,
                young: 0.95,
                adult_male: 1.4,
                adult_female: 1.25,
                imported: 1.6,
            },
            manure_n2o_direct: PerSubcategory {
                weaning: 0.05,
                yearling: 0.09,
                young: 0.12,
                adult_male: 0.18,
                adult_female: 0.16,
                imported: 0.2,
            },
            manure_n2o_indirect: PerSubcategory {
                weaning: 0.01,
                yearling: 0.02,
                young: 0.025,
                adult_male: 0.04,
                adult_female: 0.035,
                imported: 0.045,
            },
            gwp: GlobalWarmingPotentials::default(),
        }
    }
}

impl BaselineFactors {
    /// Every factor must be finite and non-negative and the GWP constants valid.
    pub fn validate(&self) -> LivestockResult<()> {
        for (name, table) in [
            ("enteric", &self.enteric),
            ("manure_ch4", &self.manure_ch4),
            ("manure_n2o_direct", &self.manure_n2o_direct),
            ("manure_n2o_indirect", &self.manure_n2o_indirect),
        ] {
            for (sub, value) in table.iter() {
                check_non_negative(&format!("{name}.{sub}"), *value)?;
            }
        }
        self.gwp.validate().map_err(|e| e.within("gwp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Subcategory;

    #[test]
    fn test_default_factors_positive() {
        let factors = BaselineFactors::default();
        for sub in Subcategory::ALL {
            assert!(factors.enteric[sub] > 0.0, "{sub} enteric EF");
            assert!(factors.manure_ch4[sub] > 0.0, "{sub} manure CH4 EF");
            assert!(factors.manure_n2o_direct[sub] > factors.manure_n2o_indirect[sub]);
        }
    }

    #[test]
    fn test_enteric_dominates_manure() {
        // Enteric fermentation is the dominant CH4 source for ruminants
        let factors = BaselineFactors::default();
        for sub in Subcategory::ALL {
            assert!(factors.enteric[sub] > 10.0 * factors.manure_ch4[sub]);
        }
    }

    #[test]
    fn test_partial_table_defaults_to_zero() {
        let factors: BaselineFactors = toml::from_str(
            r#"
            [enteric]
            weaning = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(factors.enteric.weaning, 10.0);
        assert_eq!(factors.enteric.adult_female, 0.0);
        // Tables that are not mentioned keep their defaults
        assert_eq!(factors.manure_ch4, BaselineFactors::default().manure_ch4);
    }

    #[test]
    fn test_validate_names_offending_factor() {
        assert!(BaselineFactors::default().validate().is_ok());

        let mut factors = BaselineFactors::default();
        factors.manure_n2o_indirect.young = f64::NAN;
        let err = factors.validate().unwrap_err();
        assert!(err.to_string().contains("manure_n2o_indirect.young"));

        let mut factors = BaselineFactors::default();
        factors.gwp.ch4 = 0.0;
        let err = factors.validate().unwrap_err();
        assert!(err.to_string().contains("gwp.ch4"));
    }
}
