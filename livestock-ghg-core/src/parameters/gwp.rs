//! Global warming potentials
//!
//! Constants converting CH4 and N2O masses into CO2-equivalent.

use crate::errors::{check_non_negative, LivestockError, LivestockResult};
use crate::units::N2O_N_TO_N2O;
use serde::{Deserialize, Serialize};

/// GWP constants shared by every calculation path.
///
/// # Reference
///
/// Defaults follow IPCC AR5 100-year values, which national livestock
/// inventories still report against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalWarmingPotentials {
    /// Global warming potential of methane
    /// unit: t CO2e / t CH4
    /// default: 28.0
    pub ch4: f64,

    /// Global warming potential of nitrous oxide
    /// unit: t CO2e / t N2O
    /// default: 265.0
    pub n2o: f64,

    /// Conversion from N2O-N mass to N2O mass (molecular weight ratio)
    /// unit: dimensionless
    /// default: 44/28
    pub n2o_conversion: f64,
}

impl Default for GlobalWarmingPotentials {
    fn default() -> Self {
        Self {
            ch4: 28.0,
            n2o: 265.0,
            n2o_conversion: N2O_N_TO_N2O,
        }
    }
}

impl GlobalWarmingPotentials {
    /// CH4 tons are recovered from CO2e by dividing by `ch4`, so it must be positive.
    pub fn validate(&self) -> LivestockResult<()> {
        if !(self.ch4.is_finite() && self.ch4 > 0.0) {
            return Err(LivestockError::NotPositive {
                field: "ch4".to_string(),
                value: self.ch4,
            });
        }
        check_non_negative("n2o", self.n2o)?;
        check_non_negative("n2o_conversion", self.n2o_conversion)?;
        Ok(())
    }
}
