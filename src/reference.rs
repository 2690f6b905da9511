//! Read-only reference tables shared by the classifiers.
//!
//! Built once (either the built-in data or built-in data merged with config
//! overrides) and then only ever borrowed. Override entries that cannot be
//! understood are logged and skipped; they never surface as errors.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::additive::table::{ADDITIVES, NAMES};
use crate::config::ReferenceOverrides;
use crate::models::{NutrientKind, RiskLevel};
use crate::nutrient::THRESHOLDS;

#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveInfo {
    pub function: String,
    pub risk_level: RiskLevel,
}

/// `(moderate, high)` lower bounds for one nutrient kind, per 100 g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Thresholds {
    pub fn is_valid(&self) -> bool {
        self.moderate.is_finite()
            && self.high.is_finite()
            && self.moderate >= 0.0
            && self.moderate < self.high
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    additives: HashMap<String, AdditiveInfo>,
    names: HashMap<String, String>,
    thresholds: HashMap<NutrientKind, Thresholds>,
}

static BUILTIN: Lazy<ReferenceTables> = Lazy::new(ReferenceTables::from_builtin);

impl ReferenceTables {
    /// The built-in tables, initialized on first use.
    pub fn builtin() -> &'static ReferenceTables {
        &BUILTIN
    }

    fn from_builtin() -> Self {
        let additives = ADDITIVES
            .iter()
            .map(|(code, function, risk_level)| {
                (
                    code.to_string(),
                    AdditiveInfo {
                        function: function.to_string(),
                        risk_level: *risk_level,
                    },
                )
            })
            .collect();

        let names = NAMES
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();

        let thresholds = THRESHOLDS
            .iter()
            .map(|(kind, moderate, high)| {
                (
                    *kind,
                    Thresholds {
                        moderate: *moderate,
                        high: *high,
                    },
                )
            })
            .collect();

        ReferenceTables {
            additives,
            names,
            thresholds,
        }
    }

    /// Built-in tables with config overrides layered on top.
    pub fn with_overrides(overrides: &ReferenceOverrides) -> Self {
        let mut tables = Self::from_builtin();

        for (raw_code, entry) in &overrides.additives {
            let code = crate::additive::classifier::normalize_code(raw_code);
            if code.is_empty() {
                tracing::warn!(code = %raw_code, "ignoring additive override with empty code");
                continue;
            }
            let risk_level = match RiskLevel::parse(&entry.risk) {
                Some(level) => level,
                None => {
                    tracing::warn!(
                        code = %code,
                        risk = %entry.risk,
                        "unrecognized risk label in additive override, assuming medium"
                    );
                    RiskLevel::Medium
                }
            };
            let function = if entry.function.trim().is_empty() {
                tracing::warn!(code = %code, "additive override has no function label");
                crate::additive::classifier::FALLBACK_FUNCTION.to_string()
            } else {
                entry.function.trim().to_string()
            };
            tables.additives.insert(code, AdditiveInfo { function, risk_level });
        }

        for (raw_code, name) in &overrides.names {
            let code = crate::additive::classifier::normalize_code(raw_code);
            if code.is_empty() || name.trim().is_empty() {
                tracing::warn!(code = %raw_code, "ignoring blank additive name override");
                continue;
            }
            tables.names.insert(code, name.trim().to_string());
        }

        for (label, entry) in &overrides.nutrients {
            let Some(kind) = NutrientKind::parse(label) else {
                tracing::warn!(kind = %label, "ignoring thresholds for untracked nutrient");
                continue;
            };
            let candidate = match (entry.moderate, entry.high) {
                (Some(moderate), Some(high)) => Thresholds { moderate, high },
                _ => {
                    tracing::warn!(kind = %kind, "nutrient thresholds need both moderate and high");
                    continue;
                }
            };
            if !candidate.is_valid() {
                tracing::warn!(
                    kind = %kind,
                    moderate = candidate.moderate,
                    high = candidate.high,
                    "ignoring malformed nutrient thresholds, keeping built-in values"
                );
                continue;
            }
            tables.thresholds.insert(kind, candidate);
        }

        tables
    }

    pub fn additive(&self, code: &str) -> Option<&AdditiveInfo> {
        self.additives.get(code)
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn thresholds(&self, kind: NutrientKind) -> Option<Thresholds> {
        self.thresholds.get(&kind).copied()
    }

    /// All additive entries, sorted by code.
    pub fn additives(&self) -> Vec<(&str, &AdditiveInfo)> {
        let mut entries: Vec<_> = self
            .additives
            .iter()
            .map(|(code, info)| (code.as_str(), info))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
impl ReferenceTables {
    pub fn without_thresholds(mut self, kind: NutrientKind) -> Self {
        self.thresholds.remove(&kind);
        self
    }
}
