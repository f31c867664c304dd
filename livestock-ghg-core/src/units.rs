//! Mass and CO2-equivalent conversions used across the pipeline.
//!
//! Emission factors are expressed in kg of gas per head per year. Results are
//! reported in metric tons, tons of CO2-equivalent and gigagrams.
//!
//! | From | To | Factor |
//! |------|-----|--------|
//! | kg | t | 1 / 1000 |
//! | t | Gg | 1 / 1000 |
//! | kg N2O-N | t CO2e | 44/28 x GWP(N2O) / 1000 |

/// Kilograms per metric ton.
pub const KG_PER_TON: f64 = 1000.0;

/// Metric tons per gigagram.
pub const TON_PER_GG: f64 = 1000.0;

/// Molecular weight ratio N2O / N2O-N.
pub const N2O_N_TO_N2O: f64 = 44.0 / 28.0;

pub fn kg_to_ton(kg: f64) -> f64 {
    kg / KG_PER_TON
}

pub fn ton_to_gg(ton: f64) -> f64 {
    ton / TON_PER_GG
}

/// Convert a mass of gas to its CO2-equivalent using `gwp`.
pub fn to_co2e(mass: f64, gwp: f64) -> f64 {
    mass * gwp
}

/// Convert kg of N2O-N emitted into tons of CO2-equivalent.
///
/// $$E_{CO2e} = \frac{kg \cdot r \cdot GWP_{N2O}}{1000}$$
///
/// where `r` is the N2O-N to N2O conversion (44/28 by default).
pub fn n2o_kg_to_co2e_ton(kg: f64, n2o_conversion: f64, gwp_n2o: f64) -> f64 {
    kg * n2o_conversion * gwp_n2o / KG_PER_TON
}
