//! Population distribution shares
//!
//! Fractions used to split a total head-count across subcategories and
//! production systems.

use crate::categories::{PerSubcategory, PerSystem};
use is_close::is_close;
use serde::{Deserialize, Serialize};

/// Two independent share tables: subcategory fractions and production system fractions.
///
/// Each table is expected to sum to 1. This is not enforced: the distributor
/// multiplies whatever it is given, and an unnormalised table simply scales the
/// resulting head counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionShares {
    /// Fraction of the herd in each subcategory
    /// unit: dimensionless
    pub subcategories: PerSubcategory<f64>,

    /// Fraction of the herd in each production system
    /// unit: dimensionless
    pub systems: PerSystem<f64>,
}

impl DistributionShares {
    /// Create shares from explicit tables.
    pub fn new(subcategories: PerSubcategory<f64>, systems: PerSystem<f64>) -> Self {
        Self {
            subcategories,
            systems,
        }
    }

    /// Whether both tables sum to 1 (within floating point tolerance).
    pub fn is_normalised(&self) -> bool {
        is_close!(self.subcategories.sum(), 1.0) && is_close!(self.systems.sum(), 1.0)
    }
}

impl Default for DistributionShares {
    fn default() -> Self {
        Self {
            subcategories: PerSubcategory {
                weaning: 0.12,
                yearling: 0.15,
                young: 0.18,
                adult_male: 0.15,
                adult_female: 0.35,
                imported: 0.05,
            },
            systems: PerSystem {
                extensive: 0.55,
                semi_intensive: 0.3,
                intensive: 0.15,
            },
        }
    }
}
