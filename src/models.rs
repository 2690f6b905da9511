use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A normalized food product, as produced by [`crate::normalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    pub product_name: String,
    pub brands: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Additives in upstream order. Repeated codes are kept as-is.
    #[serde(default)]
    pub additives: Vec<Additive>,
    #[serde(default)]
    pub nutriments: BTreeMap<NutrientKind, NutrientReading>,
    pub rating: Rating,
    pub rating_score: u8,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Additive {
    pub code: String,
    pub name: String,
    pub function: String,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub health_risks: Vec<HealthRisk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRisk {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Parse a reference-table label (`"high"`, `"medium"`, `"low"`, any case).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(RiskLevel::High),
            "medium" | "moderate" => Some(RiskLevel::Medium),
            "low" => Some(RiskLevel::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientReading {
    pub value: f64,
    pub unit: String,
    pub level: NutrientLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientKind {
    Energy,
    Fat,
    Sugars,
    Salt,
}

impl NutrientKind {
    pub const ALL: [NutrientKind; 4] = [
        NutrientKind::Energy,
        NutrientKind::Fat,
        NutrientKind::Sugars,
        NutrientKind::Salt,
    ];

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "energy" => Some(NutrientKind::Energy),
            "fat" => Some(NutrientKind::Fat),
            "sugars" => Some(NutrientKind::Sugars),
            "salt" => Some(NutrientKind::Salt),
            _ => None,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            NutrientKind::Energy => "kcal",
            _ => "g",
        }
    }
}

impl std::fmt::Display for NutrientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutrientKind::Energy => write!(f, "energy"),
            NutrientKind::Fat => write!(f, "fat"),
            NutrientKind::Sugars => write!(f, "sugars"),
            NutrientKind::Salt => write!(f, "salt"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutrientLevel::Low => write!(f, "low"),
            NutrientLevel::Moderate => write!(f, "moderate"),
            NutrientLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Poor,
    Bad,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Excellent => write!(f, "Excellent"),
            Rating::Good => write!(f, "Good"),
            Rating::Poor => write!(f, "Poor"),
            Rating::Bad => write!(f, "Bad"),
        }
    }
}
