//! Population distributor
//!
//! Splits a total head-count into the (subcategory x production system) grid.

use crate::categories::{PerSubcategory, PerSystem, ProductionSystem, Subcategory};
use crate::parameters::DistributionShares;
use serde::{Deserialize, Serialize};

/// Head counts per (subcategory, production system) cell.
///
/// Counts are real numbers: fractional heads are kept so later stages do not
/// accumulate rounding error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionResult(pub PerSubcategory<PerSystem<f64>>);

impl DistributionResult {
    pub fn get(&self, sub: Subcategory, sys: ProductionSystem) -> f64 {
        self.0[sub][sys]
    }

    /// Iterate over every cell as `(subcategory, system, population)` in canonical order.
    pub fn cells(&self) -> impl Iterator<Item = (Subcategory, ProductionSystem, f64)> + '_ {
        Subcategory::ALL.into_iter().flat_map(move |sub| {
            ProductionSystem::ALL
                .into_iter()
                .map(move |sys| (sub, sys, self.get(sub, sys)))
        })
    }

    /// Total population across all cells.
    pub fn total(&self) -> f64 {
        self.cells().map(|(_, _, pop)| pop).sum()
    }
}

/// Distribute `total_population` over the grid:
///
/// $$N_{s,p} = N \cdot f_s \cdot g_p$$
///
/// No rounding is applied and no input is rejected: zero or malformed shares
/// produce zero cells and a negative population produces negative cells.
pub fn distribute_population(
    total_population: f64,
    shares: &DistributionShares,
) -> DistributionResult {
    DistributionResult(PerSubcategory::from_fn(|sub| {
        PerSystem::from_fn(|sys| {
            total_population * shares.subcategories[sub] * shares.systems[sys]
        })
    }))
}
