use crate::additive::table::curated_details;
use crate::models::{Additive, HealthRisk, RiskLevel};
use crate::reference::ReferenceTables;

/// Function label used when an additive is not in the reference table.
pub const FALLBACK_FUNCTION: &str = "Food additive";

const NO_DETAILS: &str = "Detailed information about this additive is not available.";

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub function: String,
    pub risk_level: RiskLevel,
}

/// Normalize a raw additive tag into its lookup key.
///
/// `"en:E330"` → `"e330"`, `"621"` → `"e621"`, `"e150a"` → `"e150a"`.
/// Only the final colon-delimited segment is kept.
pub fn normalize_code(raw: &str) -> String {
    let bare = raw.rsplit(':').next().unwrap_or(raw).trim().to_lowercase();
    if !bare.is_empty() && bare.chars().all(|c| c.is_ascii_digit()) {
        format!("e{}", bare)
    } else {
        bare
    }
}

/// Classify an additive code into a function label and risk level.
///
/// Never fails: codes missing from the table get [`FALLBACK_FUNCTION`] and
/// [`RiskLevel::Medium`].
pub fn classify(tables: &ReferenceTables, raw_code: &str) -> Classification {
    let code = normalize_code(raw_code);
    match tables.additive(&code) {
        Some(info) => Classification {
            function: info.function.clone(),
            risk_level: info.risk_level,
        },
        None => {
            tracing::debug!(code = %code, "additive not in reference table");
            Classification {
                function: FALLBACK_FUNCTION.to_string(),
                risk_level: RiskLevel::Medium,
            }
        }
    }
}

/// Human-readable name for an additive, or the uppercased bare code.
pub fn display_name(tables: &ReferenceTables, raw_code: &str) -> String {
    let code = normalize_code(raw_code);
    match tables.name(&code) {
        Some(name) => name.to_string(),
        None => raw_code
            .rsplit(':')
            .next()
            .unwrap_or(raw_code)
            .trim()
            .to_uppercase(),
    }
}

/// Build a classified [`Additive`] from a raw tag, without extended details.
pub fn resolve(tables: &ReferenceTables, raw_code: &str) -> Additive {
    let Classification {
        function,
        risk_level,
    } = classify(tables, raw_code);

    Additive {
        code: normalize_code(raw_code),
        name: display_name(tables, raw_code),
        function,
        risk_level,
        purpose: None,
        description: None,
        health_risks: Vec::new(),
    }
}

/// Full record for an additive, including curated purpose and health risks where known.
pub fn details(tables: &ReferenceTables, raw_code: &str) -> Additive {
    let mut additive = resolve(tables, raw_code);

    match curated_details(&additive.code) {
        Some(d) => {
            additive.name = d.name.to_string();
            additive.purpose = Some(d.purpose.to_string());
            additive.description = Some(d.description.to_string());
            additive.health_risks = d
                .health_risks
                .iter()
                .map(|name| HealthRisk {
                    name: name.to_string(),
                })
                .collect();
        }
        None => {
            if tables.name(&additive.code).is_none() {
                additive.name = additive.code.to_uppercase();
            }
            additive.description = Some(NO_DETAILS.to_string());
        }
    }

    additive
}
