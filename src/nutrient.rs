use crate::models::{NutrientKind, NutrientLevel};
use crate::reference::{ReferenceTables, Thresholds};

/// Built-in `(kind, moderate, high)` thresholds per 100 g.
pub const THRESHOLDS: &[(NutrientKind, f64, f64)] = &[
    (NutrientKind::Energy, 200.0, 400.0),
    (NutrientKind::Fat, 3.0, 17.5),
    (NutrientKind::Sugars, 5.0, 22.5),
    (NutrientKind::Salt, 0.3, 1.5),
];

/// Classify a nutrient value. Lower bounds are inclusive, so a boundary value
/// lands in the higher tier. Kinds without thresholds are `Moderate`.
///
/// Callers filter out negative and non-finite values first.
pub fn level(tables: &ReferenceTables, kind: NutrientKind, value: f64) -> NutrientLevel {
    match tables.thresholds(kind) {
        Some(t) => tier(t, value),
        None => NutrientLevel::Moderate,
    }
}

fn tier(t: Thresholds, value: f64) -> NutrientLevel {
    if value >= t.high {
        NutrientLevel::High
    } else if value >= t.moderate {
        NutrientLevel::Moderate
    } else {
        NutrientLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::builtin()
    }

    #[test]
    fn test_boundaries_belong_to_higher_tier() {
        assert_eq!(level(tables(), NutrientKind::Fat, 17.5), NutrientLevel::High);
        assert_eq!(level(tables(), NutrientKind::Fat, 3.0), NutrientLevel::Moderate);
        assert_eq!(level(tables(), NutrientKind::Fat, 2.99), NutrientLevel::Low);
        assert_eq!(level(tables(), NutrientKind::Salt, 1.5), NutrientLevel::High);
        assert_eq!(level(tables(), NutrientKind::Energy, 200.0), NutrientLevel::Moderate);
        assert_eq!(level(tables(), NutrientKind::Energy, 0.0), NutrientLevel::Low);
    }

    #[test]
    fn test_sugars() {
        assert_eq!(level(tables(), NutrientKind::Sugars, 4.9), NutrientLevel::Low);
        assert_eq!(level(tables(), NutrientKind::Sugars, 10.0), NutrientLevel::Moderate);
        assert_eq!(level(tables(), NutrientKind::Sugars, 50.0), NutrientLevel::High);
    }

    #[test]
    fn test_kind_without_thresholds_is_moderate() {
        let tables = ReferenceTables::builtin().clone().without_thresholds(NutrientKind::Salt);
        assert_eq!(level(&tables, NutrientKind::Salt, 0.0), NutrientLevel::Moderate);
        assert_eq!(level(&tables, NutrientKind::Salt, 1000.0), NutrientLevel::Moderate);
        assert_eq!(level(&tables, NutrientKind::Fat, 20.0), NutrientLevel::High);
    }

    #[test]
    fn test_level_is_monotonic() {
        for kind in NutrientKind::ALL {
            let mut previous = NutrientLevel::Low;
            for step in 0..2000 {
                let value = step as f64 * 0.25;
                let current = level(tables(), kind, value);
                assert!(current >= previous, "{kind} dropped at {value}");
                previous = current;
            }
        }
    }
}
