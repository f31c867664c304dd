//! Mitigation actions and the sequential mitigation applier.
//!
//! A mitigation action cuts the quantity it targets by `rate x coverage`. Actions
//! are configuration ([`MitigationCatalog`]); a submission selects actions by id
//! and states the coverage it achieves ([`MitigationInput`]).
//!
//! [`apply_mitigations`] folds the selected actions over a [`BaselineEmission`] one
//! at a time, rounding after every step. The segment calculators in
//! [`crate::segment`] compose mitigations differently (two cumulative products,
//! no intermediate rounding); the two algorithms are kept separate on purpose
//! because they back different submission flows with different published figures.

use crate::baseline::BaselineEmission;
use crate::rounding::{clamp01, round2};
use crate::units::to_co2e;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Emission pathway a mitigation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationTarget {
    Enteric,
    Manure,
}

impl fmt::Display for MitigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MitigationTarget::Enteric => f.write_str("enteric"),
            MitigationTarget::Manure => f.write_str("manure"),
        }
    }
}

/// What a mitigation reduces.
///
/// - `Ef`: the emission factor (kg gas per head)
/// - `Emission`: the aggregated emission itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationType {
    Ef,
    Emission,
}

impl fmt::Display for MitigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MitigationType::Ef => f.write_str("ef"),
            MitigationType::Emission => f.write_str("emission"),
        }
    }
}

/// A configured mitigation action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationActionDefinition {
    pub name: String,
    pub target: MitigationTarget,
    #[serde(rename = "type")]
    pub kind: MitigationType,
    /// Reduction rate at full coverage
    /// unit: fraction in [0, 1]
    pub rate: f64,
}

impl MitigationActionDefinition {
    pub fn new(
        name: impl Into<String>,
        target: MitigationTarget,
        kind: MitigationType,
        rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            kind,
            rate,
        }
    }

    /// Multiplier left after applying this action at `coverage`.
    ///
    /// $$f = 1 - r \cdot \mathrm{clamp}_{[0,1]}(c)$$
    pub fn factor(&self, coverage: f64) -> f64 {
        1.0 - self.rate * clamp01(coverage)
    }
}

/// A submission's selection of one mitigation action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationInput {
    pub action_id: String,
    /// Portion of the targeted population/emission covered by the action
    /// unit: fraction in [0, 1]
    pub coverage: f64,
}

impl MitigationInput {
    pub fn new(action_id: impl Into<String>, coverage: f64) -> Self {
        Self {
            action_id: action_id.into(),
            coverage,
        }
    }
}

/// Mitigation action definitions keyed by action id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MitigationCatalog(BTreeMap<String, MitigationActionDefinition>);

impl MitigationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, definition: MitigationActionDefinition) {
        self.0.insert(id.into(), definition);
    }

    pub fn get(&self, id: &str) -> Option<&MitigationActionDefinition> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Add every definition of `other`, replacing existing ids.
    pub fn merge(&mut self, other: MitigationCatalog) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MitigationActionDefinition)> {
        self.0.iter().map(|(id, def)| (id.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve `inputs` against the catalog, dropping unknown ids.
    pub fn resolve<'a>(
        &'a self,
        inputs: &'a [MitigationInput],
    ) -> impl Iterator<Item = (&'a MitigationActionDefinition, f64)> + 'a {
        inputs.iter().filter_map(move |input| match self.get(&input.action_id) {
            Some(definition) => Some((definition, input.coverage)),
            None => {
                debug!(action_id = %input.action_id, "Unknown mitigation action; skipping");
                None
            }
        })
    }
}

impl<S: Into<String>> FromIterator<(S, MitigationActionDefinition)> for MitigationCatalog {
    fn from_iter<I: IntoIterator<Item = (S, MitigationActionDefinition)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, def)| (id.into(), def)).collect())
    }
}

/// Apply mitigations to a baseline snapshot as a sequential fold.
///
/// Each action compounds on the running (already rounded) values:
///
/// - enteric / `Ef`: `enteric_ch4_ton` is multiplied by the factor
/// - enteric / `Emission`: the factor is applied to the CO2e value and converted
///   back to CH4 tons, `(ch4 x gwp x f) / gwp`
/// - manure (either type): CH4 tons and both N2O CO2e fields are multiplied by
///   the factor
///
/// Every multiplication is rounded to 2 decimals immediately. The CH4 CO2e fields
/// are recomputed from the final CH4 tons at the end. Unknown action ids are
/// skipped and coverage is clamped to `[0, 1]`.
pub fn apply_mitigations(
    baseline: &BaselineEmission,
    mitigations: &[MitigationInput],
    catalog: &MitigationCatalog,
    gwp_ch4: f64,
) -> BaselineEmission {
    let mut result = *baseline;

    for (definition, coverage) in catalog.resolve(mitigations) {
        let factor = definition.factor(coverage);

        match (definition.target, definition.kind) {
            (MitigationTarget::Enteric, MitigationType::Ef) => {
                result.enteric_ch4_ton = round2(result.enteric_ch4_ton * factor);
            }
            (MitigationTarget::Enteric, MitigationType::Emission) => {
                let co2e = to_co2e(result.enteric_ch4_ton, gwp_ch4) * factor;
                result.enteric_ch4_ton = round2(co2e / gwp_ch4);
            }
            (MitigationTarget::Manure, _) => {
                result.manure_ch4_ton = round2(result.manure_ch4_ton * factor);
                result.manure_n2o_direct_co2e_ton =
                    round2(result.manure_n2o_direct_co2e_ton * factor);
                result.manure_n2o_indirect_co2e_ton =
                    round2(result.manure_n2o_indirect_co2e_ton * factor);
            }
        }
    }

    result.enteric_co2e_ton = round2(to_co2e(result.enteric_ch4_ton, gwp_ch4));
    result.manure_ch4_co2e_ton = round2(to_co2e(result.manure_ch4_ton, gwp_ch4));
    result
}
