use crate::models::{Additive, Rating, RiskLevel};

const HIGH_PENALTY: i64 = 30;
const MEDIUM_PENALTY: i64 = 10;
const LOW_PENALTY: i64 = 2;

/// Score a product from its additives' risk levels.
///
/// No additives scores 100. Each additive subtracts a penalty by risk level and
/// the result is clamped to `0..=100`. Order and identity do not matter.
pub fn aggregate(additives: &[Additive]) -> (Rating, u8) {
    let score = score(additives.iter().map(|a| a.risk_level));
    (rating_for(score), score)
}

pub fn score(levels: impl IntoIterator<Item = RiskLevel>) -> u8 {
    let penalty: i64 = levels
        .into_iter()
        .map(|level| match level {
            RiskLevel::High => HIGH_PENALTY,
            RiskLevel::Medium => MEDIUM_PENALTY,
            RiskLevel::Low => LOW_PENALTY,
        })
        .sum();

    (100 - penalty).clamp(0, 100) as u8
}

pub fn rating_for(score: u8) -> Rating {
    match score {
        80.. => Rating::Excellent,
        60..=79 => Rating::Good,
        40..=59 => Rating::Poor,
        _ => Rating::Bad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn additive(risk_level: RiskLevel) -> Additive {
        Additive {
            code: "e000".to_string(),
            name: "E000".to_string(),
            function: "Food additive".to_string(),
            risk_level,
            purpose: None,
            description: None,
            health_risks: Vec::new(),
        }
    }

    fn of(levels: &[RiskLevel]) -> Vec<Additive> {
        levels.iter().copied().map(additive).collect()
    }

    #[test]
    fn test_no_additives_is_excellent() {
        assert_eq!(aggregate(&[]), (Rating::Excellent, 100));
    }

    #[test]
    fn test_single_high_risk() {
        assert_eq!(aggregate(&of(&[RiskLevel::High])), (Rating::Good, 70));
    }

    #[test]
    fn test_three_high_risk() {
        assert_eq!(aggregate(&of(&[RiskLevel::High; 3])), (Rating::Bad, 10));
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(aggregate(&of(&[RiskLevel::High; 4])), (Rating::Bad, 0));
        assert_eq!(aggregate(&of(&[RiskLevel::Medium; 25])), (Rating::Bad, 0));
    }

    #[test]
    fn test_mixed_levels() {
        // 100 - 30 - 10 - 2 = 58
        let additives = of(&[RiskLevel::Low, RiskLevel::High, RiskLevel::Medium]);
        assert_eq!(aggregate(&additives), (Rating::Poor, 58));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = of(&[RiskLevel::High, RiskLevel::Low, RiskLevel::Low]);
        let b = of(&[RiskLevel::Low, RiskLevel::High, RiskLevel::Low]);
        assert_eq!(aggregate(&a), aggregate(&b));
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(rating_for(100), Rating::Excellent);
        assert_eq!(rating_for(80), Rating::Excellent);
        assert_eq!(rating_for(79), Rating::Good);
        assert_eq!(rating_for(60), Rating::Good);
        assert_eq!(rating_for(59), Rating::Poor);
        assert_eq!(rating_for(40), Rating::Poor);
        assert_eq!(rating_for(39), Rating::Bad);
        assert_eq!(rating_for(0), Rating::Bad);
    }
}
