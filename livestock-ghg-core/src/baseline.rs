//! Baseline emission calculator
//!
//! Applies per-subcategory emission factors to a population distribution.

use crate::distribution::DistributionResult;
use crate::parameters::BaselineFactors;
use crate::rounding::round2;
use crate::units::{kg_to_ton, n2o_kg_to_co2e_ton, to_co2e};
use serde::{Deserialize, Serialize};

/// Baseline (or mitigated) emission snapshot.
///
/// Every field is rounded to 2 decimal places when it is computed, so consumers
/// only ever see figures with at most 2 decimals and recomputation from the same
/// inputs is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineEmission {
    /// unit: t CH4 / yr
    #[serde(rename = "entericCH4Ton")]
    pub enteric_ch4_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "entericCO2eTon")]
    pub enteric_co2e_ton: f64,
    /// unit: t CH4 / yr
    #[serde(rename = "manureCH4Ton")]
    pub manure_ch4_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "manureCH4CO2eTon")]
    pub manure_ch4_co2e_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "manureN2ODirectCO2eTon")]
    pub manure_n2o_direct_co2e_ton: f64,
    /// unit: t CO2e / yr
    #[serde(rename = "manureN2OIndirectCO2eTon")]
    pub manure_n2o_indirect_co2e_ton: f64,
}

impl BaselineEmission {
    /// Sum of the four CO2-equivalent fields.
    pub fn total_co2e_ton(&self) -> f64 {
        self.enteric_co2e_ton
            + self.manure_ch4_co2e_ton
            + self.manure_n2o_direct_co2e_ton
            + self.manure_n2o_indirect_co2e_ton
    }

    /// Manure CO2-equivalent total (CH4 + direct and indirect N2O).
    pub fn manure_co2e_ton(&self) -> f64 {
        self.manure_ch4_co2e_ton
            + self.manure_n2o_direct_co2e_ton
            + self.manure_n2o_indirect_co2e_ton
    }
}

/// Calculate baseline emissions for a distributed population.
///
/// The emission factor of a cell depends only on its subcategory; the production
/// system only selects the head count.
///
/// $$E_{CH4} = \frac{1}{1000}\sum_{s,p} N_{s,p} \cdot EF_s$$
///
/// CO2e fields are derived from the already rounded CH4 tons, so
/// `enteric_co2e_ton == round2(enteric_ch4_ton * gwp_ch4)` holds exactly.
pub fn calculate_baseline_emissions(
    distribution: &DistributionResult,
    factors: &BaselineFactors,
) -> BaselineEmission {
    let mut enteric_ch4_kg = 0.0;
    let mut manure_ch4_kg = 0.0;
    let mut n2o_direct_kg = 0.0;
    let mut n2o_indirect_kg = 0.0;

    for (sub, _sys, population) in distribution.cells() {
        enteric_ch4_kg += population * factors.enteric[sub];
        manure_ch4_kg += population * factors.manure_ch4[sub];
        n2o_direct_kg += population * factors.manure_n2o_direct[sub];
        n2o_indirect_kg += population * factors.manure_n2o_indirect[sub];
    }

    let gwp = &factors.gwp;
    let enteric_ch4_ton = round2(kg_to_ton(enteric_ch4_kg));
    let manure_ch4_ton = round2(kg_to_ton(manure_ch4_kg));

    BaselineEmission {
        enteric_ch4_ton,
        enteric_co2e_ton: round2(to_co2e(enteric_ch4_ton, gwp.ch4)),
        manure_ch4_ton,
        manure_ch4_co2e_ton: round2(to_co2e(manure_ch4_ton, gwp.ch4)),
        manure_n2o_direct_co2e_ton: round2(n2o_kg_to_co2e_ton(
            n2o_direct_kg,
            gwp.n2o_conversion,
            gwp.n2o,
        )),
        manure_n2o_indirect_co2e_ton: round2(n2o_kg_to_co2e_ton(
            n2o_indirect_kg,
            gwp.n2o_conversion,
            gwp.n2o,
        )),
    }
}
