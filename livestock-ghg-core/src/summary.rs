//! Summary builder
//!
//! Reduces a baseline and a mitigated snapshot into presentation figures.

use crate::baseline::BaselineEmission;
use crate::rounding::{round2, round3};
use crate::units::ton_to_gg;
use serde::{Deserialize, Serialize};

/// Mitigated emissions per gas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GasBreakdown {
    /// unit: Gg CO2e / yr
    #[serde(rename = "CH4")]
    pub ch4_gg: f64,
    /// unit: Gg CO2e / yr
    #[serde(rename = "N2O")]
    pub n2o_gg: f64,
    /// unit: Gg CO2e / yr
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManureDetail {
    #[serde(rename = "CH4_CO2e_ton")]
    pub ch4_co2e_ton: f64,
    #[serde(rename = "N2O_direct_CO2e_ton")]
    pub n2o_direct_co2e_ton: f64,
    #[serde(rename = "N2O_indirect_CO2e_ton")]
    pub n2o_indirect_co2e_ton: f64,
    #[serde(rename = "total_CO2e_ton")]
    pub total_co2e_ton: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntericDetail {
    #[serde(rename = "CH4_ton")]
    pub ch4_ton: f64,
    #[serde(rename = "CH4_CO2e_ton")]
    pub ch4_co2e_ton: f64,
    #[serde(rename = "CH4_GgCO2e")]
    pub ch4_gg_co2e: f64,
}

/// User-facing summary of a baseline/mitigated pair.
///
/// Ton figures are rounded to 2 decimals and Gg figures to 3. The summary is a
/// derived view and is always recomputable from the pair it summarises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// unit: t CO2e / yr
    pub baseline_total: f64,
    /// unit: t CO2e / yr
    pub mitigated_total: f64,
    /// unit: t CO2e / yr
    pub reduction: f64,
    /// unit: %
    pub percent: f64,
    pub by_gas: GasBreakdown,
    pub manure: ManureDetail,
    pub enteric: EntericDetail,
}

/// Build a [`SummaryResult`] from a baseline snapshot and its mitigated counterpart.
///
/// The reduction percentage is computed from the unrounded totals and left
/// unrounded; it is 0 when the baseline total is not positive. The per-gas and
/// detail blocks describe the mitigated snapshot.
pub fn build_summary(baseline: &BaselineEmission, mitigated: &BaselineEmission) -> SummaryResult {
    let baseline_total = baseline.total_co2e_ton();
    let mitigated_total = mitigated.total_co2e_ton();
    let reduction = baseline_total - mitigated_total;
    let percent = if baseline_total > 0.0 {
        reduction / baseline_total * 100.0
    } else {
        0.0
    };

    let ch4_co2e = mitigated.enteric_co2e_ton + mitigated.manure_ch4_co2e_ton;
    let n2o_co2e = mitigated.manure_n2o_direct_co2e_ton + mitigated.manure_n2o_indirect_co2e_ton;

    SummaryResult {
        baseline_total: round2(baseline_total),
        mitigated_total: round2(mitigated_total),
        reduction: round2(reduction),
        percent,
        by_gas: GasBreakdown {
            ch4_gg: round3(ton_to_gg(ch4_co2e)),
            n2o_gg: round3(ton_to_gg(n2o_co2e)),
            total: round3(ton_to_gg(mitigated_total)),
        },
        manure: ManureDetail {
            ch4_co2e_ton: round2(mitigated.manure_ch4_co2e_ton),
            n2o_direct_co2e_ton: round2(mitigated.manure_n2o_direct_co2e_ton),
            n2o_indirect_co2e_ton: round2(mitigated.manure_n2o_indirect_co2e_ton),
            total_co2e_ton: round2(mitigated.manure_co2e_ton()),
        },
        enteric: EntericDetail {
            ch4_ton: round2(mitigated.enteric_ch4_ton),
            ch4_co2e_ton: round2(mitigated.enteric_co2e_ton),
            ch4_gg_co2e: round3(ton_to_gg(mitigated.enteric_co2e_ton)),
        },
    }
}
