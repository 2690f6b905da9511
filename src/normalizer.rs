//! Turn a raw upstream product payload into a canonical [`Product`].
//!
//! The upstream record is loosely structured, so every field of [`RawPayload`]
//! is independently optional and checked explicitly.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::additive::classifier;
use crate::error::ScanError;
use crate::models::{Additive, NutrientKind, NutrientReading, Product};
use crate::nutrient;
use crate::rating;
use crate::reference::ReferenceTables;

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

#[derive(Debug, Default, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub product: Option<RawProduct>,
}

/// The success indicator: `1` in the v0/v2 APIs, `"success"` in later ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    Code(i64),
    Text(String),
}

impl RawStatus {
    pub fn is_success(&self) -> bool {
        match self {
            RawStatus::Code(code) => *code == 1,
            RawStatus::Text(text) => text.starts_with("success"),
        }
    }
}

/// Text fields stay untyped so a wrongly typed value only loses that field.
#[derive(Debug, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub product_name: Option<serde_json::Value>,
    #[serde(default)]
    pub brands: Option<serde_json::Value>,
    #[serde(default)]
    pub image_url: Option<serde_json::Value>,
    /// Kept untyped: anything other than a list of strings yields no additives.
    #[serde(default)]
    pub additives_tags: Option<serde_json::Value>,
    #[serde(default)]
    pub nutriments: Option<RawNutriments>,
}

/// Values are numbers or numeric strings depending on the upstream record.
#[derive(Debug, Default, Deserialize)]
pub struct RawNutriments {
    #[serde(default)]
    pub energy_100g: Option<serde_json::Value>,
    #[serde(default)]
    pub fat_100g: Option<serde_json::Value>,
    #[serde(default)]
    pub sugars_100g: Option<serde_json::Value>,
    #[serde(default)]
    pub salt_100g: Option<serde_json::Value>,
}

impl RawNutriments {
    fn field(&self, kind: NutrientKind) -> Option<&serde_json::Value> {
        match kind {
            NutrientKind::Energy => self.energy_100g.as_ref(),
            NutrientKind::Fat => self.fat_100g.as_ref(),
            NutrientKind::Sugars => self.sugars_100g.as_ref(),
            NutrientKind::Salt => self.salt_100g.as_ref(),
        }
    }
}

/// Parse the upstream response body. Malformed JSON is a fetch failure.
pub fn parse_payload(body: &[u8]) -> Result<RawPayload, ScanError> {
    serde_json::from_slice(body)
        .map_err(|e| ScanError::FetchFailed(format!("invalid product payload: {}", e)))
}

/// Normalize a payload into a [`Product`] stamped with the current time.
///
/// A payload without a success status or without a product record is
/// [`ScanError::NotFound`].
pub fn normalize(payload: RawPayload, tables: &ReferenceTables) -> Result<Product, ScanError> {
    let requested = code_text(payload.code.as_ref()).unwrap_or_default();

    let succeeded = payload.status.as_ref().is_some_and(RawStatus::is_success);
    let product = match payload.product {
        Some(product) if succeeded => product,
        _ => return Err(ScanError::NotFound { code: requested }),
    };

    let code = code_text(product.code.as_ref())
        .or_else(|| non_blank(Some(requested.as_str())))
        .ok_or_else(|| ScanError::FetchFailed("product record has no code".to_string()))?;

    let additives = extract_additives(product.additives_tags.as_ref(), tables);
    let nutriments = match &product.nutriments {
        Some(raw) => extract_nutriments(raw, tables),
        None => BTreeMap::new(),
    };
    let (rating, rating_score) = rating::aggregate(&additives);

    Ok(Product {
        code,
        product_name: text(product.product_name.as_ref())
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
        brands: text(product.brands.as_ref()).unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
        image_url: text(product.image_url.as_ref()),
        additives,
        nutriments,
        rating,
        rating_score,
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// A non-blank string field; any other JSON type counts as absent.
fn text(value: Option<&serde_json::Value>) -> Option<String> {
    non_blank(value.and_then(|v| v.as_str()))
}

/// Barcodes occasionally arrive as bare JSON integers.
fn code_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::Number(n)) if n.is_u64() => Some(n.to_string()),
        other => text(other),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn extract_additives(tags: Option<&serde_json::Value>, tables: &ReferenceTables) -> Vec<Additive> {
    let Some(list) = tags.and_then(|t| t.as_array()) else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|tag| tag.as_str())
        .filter(|tag| !classifier::normalize_code(tag).is_empty())
        .map(|tag| classifier::resolve(tables, tag))
        .collect()
}

fn extract_nutriments(
    raw: &RawNutriments,
    tables: &ReferenceTables,
) -> BTreeMap<NutrientKind, NutrientReading> {
    let mut readings = BTreeMap::new();

    for kind in NutrientKind::ALL {
        let Some(field) = raw.field(kind) else {
            continue;
        };
        let Some(value) = as_number(field) else {
            tracing::debug!(kind = %kind, value = %field, "skipping unusable nutrient value");
            continue;
        };
        // Energy is stored rounded but classified on the raw value.
        let level = nutrient::level(tables, kind, value);
        let value = match kind {
            NutrientKind::Energy => value.round(),
            _ => value,
        };

        readings.insert(
            kind,
            NutrientReading {
                value,
                unit: kind.unit().to_string(),
                level,
            },
        );
    }

    readings
}

fn as_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number >= 0.0).then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NutrientLevel, Rating, RiskLevel};

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::builtin()
    }

    fn run(json: &str) -> Result<Product, ScanError> {
        normalize(parse_payload(json.as_bytes())?, tables())
    }

    #[test]
    fn test_single_additive_no_nutriments() {
        let product = run(
            r#"{"status": 1, "code": "123", "product": {"code": "123", "additives_tags": ["en:e621"]}}"#,
        )
        .unwrap();

        assert_eq!(product.additives.len(), 1);
        assert_eq!(product.additives[0].code, "e621");
        assert_eq!(product.additives[0].name, "Monosodium glutamate");
        assert_eq!(product.additives[0].risk_level, RiskLevel::High);
        assert!(product.nutriments.is_empty());
        assert_eq!((product.rating, product.rating_score), (Rating::Good, 70));
    }

    #[test]
    fn test_placeholders_for_missing_name_and_brand() {
        let product = run(r#"{"status": 1, "product": {"code": "42", "product_name": "", "brands": null}}"#)
            .unwrap();
        assert_eq!(product.product_name, UNKNOWN_PRODUCT);
        assert_eq!(product.brands, UNKNOWN_BRAND);
        assert!(product.image_url.is_none());
        assert_eq!((product.rating, product.rating_score), (Rating::Excellent, 100));
    }

    #[test]
    fn test_not_found_when_status_or_product_missing() {
        let err = run(r#"{"status": 0, "code": "999", "status_verbose": "product not found"}"#)
            .unwrap_err();
        assert_eq!(err, ScanError::NotFound { code: "999".to_string() });

        let err = run(r#"{"code": "999", "product": {"code": "999"}}"#).unwrap_err();
        assert!(err.is_not_found());

        let err = run(r#"{"status": 1, "code": "999"}"#).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_text_status_accepted() {
        let product = run(r#"{"status": "success", "product": {"code": "7"}}"#).unwrap();
        assert_eq!(product.code, "7");
    }

    #[test]
    fn test_malformed_body_is_fetch_failure() {
        let err = run("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ScanError::FetchFailed(_)));
    }

    #[test]
    fn test_code_falls_back_to_top_level() {
        let product = run(r#"{"status": 1, "code": "555", "product": {}}"#).unwrap();
        assert_eq!(product.code, "555");

        let err = run(r#"{"status": 1, "product": {}}"#).unwrap_err();
        assert!(matches!(err, ScanError::FetchFailed(_)));
    }

    #[test]
    fn test_additives_keep_order_and_duplicates() {
        let product = run(
            r#"{"status": 1, "product": {"code": "1",
                "additives_tags": ["en:e330", "en:e1520", "en:e330", "en:", 12]}}"#,
        )
        .unwrap();
        let codes: Vec<&str> = product.additives.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, ["e330", "e1520", "e330"]);
        assert_eq!(product.additives[1].name, "E1520");
        assert_eq!(product.additives[1].function, "Food additive");
        // 100 - 2 - 10 - 2
        assert_eq!(product.rating_score, 86);
    }

    #[test]
    fn test_non_list_additives_yield_none() {
        let product = run(r#"{"status": 1, "product": {"code": "1", "additives_tags": "en:e621"}}"#)
            .unwrap();
        assert!(product.additives.is_empty());
    }

    #[test]
    fn test_nutriments_sparse_and_rounded() {
        let product = run(
            r#"{"status": 1, "product": {"code": "1", "nutriments": {
                "energy_100g": 1546.6, "fat_100g": 17.5, "salt_100g": "0.25"}}}"#,
        )
        .unwrap();

        assert_eq!(product.nutriments.len(), 3);
        assert!(!product.nutriments.contains_key(&NutrientKind::Sugars));

        let energy = &product.nutriments[&NutrientKind::Energy];
        assert_eq!(energy.value, 1547.0);
        assert_eq!(energy.unit, "kcal");
        assert_eq!(energy.level, NutrientLevel::High);

        let fat = &product.nutriments[&NutrientKind::Fat];
        assert_eq!(fat.value, 17.5);
        assert_eq!(fat.level, NutrientLevel::High);

        let salt = &product.nutriments[&NutrientKind::Salt];
        assert_eq!(salt.value, 0.25);
        assert_eq!(salt.level, NutrientLevel::Low);
    }

    #[test]
    fn test_energy_level_uses_unrounded_value() {
        let product = run(
            r#"{"status": 1, "product": {"code": "1", "nutriments": {"energy_100g": 199.6}}}"#,
        )
        .unwrap();

        let energy = &product.nutriments[&NutrientKind::Energy];
        assert_eq!(energy.value, 200.0);
        assert_eq!(energy.level, NutrientLevel::Low);
    }

    #[test]
    fn test_wrongly_typed_text_fields_degrade_alone() {
        let product = run(
            r#"{"status": 1, "product": {"code": "1", "product_name": 123,
                "brands": ["Acme"], "image_url": {"front": "x.jpg"},
                "additives_tags": ["en:e621"]}}"#,
        )
        .unwrap();

        assert_eq!(product.code, "1");
        assert_eq!(product.product_name, UNKNOWN_PRODUCT);
        assert_eq!(product.brands, UNKNOWN_BRAND);
        assert!(product.image_url.is_none());
        assert_eq!(product.additives.len(), 1);
        assert_eq!(product.rating_score, 70);
    }

    #[test]
    fn test_numeric_code_is_accepted() {
        let product = run(r#"{"status": 1, "code": 5449000000996, "product": {"code": 5449000000996}}"#)
            .unwrap();
        assert_eq!(product.code, "5449000000996");

        let err = run(r#"{"status": 1, "product": {"code": true}}"#).unwrap_err();
        assert!(matches!(err, ScanError::FetchFailed(_)));
    }

    #[test]
    fn test_zero_is_a_reading_but_negative_is_not() {
        let product = run(
            r#"{"status": 1, "product": {"code": "1", "nutriments": {
                "sugars_100g": 0, "fat_100g": -1, "salt_100g": null}}}"#,
        )
        .unwrap();
        assert_eq!(product.nutriments.len(), 1);
        assert_eq!(product.nutriments[&NutrientKind::Sugars].level, NutrientLevel::Low);
    }
}
