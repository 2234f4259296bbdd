use crate::domain::model::{RiskAssessment, RiskLevel, RiskOutcome};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_text, Validate};

const PRESERVE: &str = "Keep current preventive measures and monitor periodically.";
const CONTROL: &str = "Implement additional control measures and increase monitoring frequency.";
const CORRECT: &str = "Immediate corrective action required. Draw up a detailed action plan.";
const URGENT: &str = "Urgent intervention required. Suspend activities until adequate controls are in place.";

impl Validate for RiskAssessment {
    fn validate(&self) -> Result<()> {
        validate_required_text("client", &self.client)?;
        validate_required_text("sector", &self.sector)?;
        Ok(())
    }
}

pub fn base_score(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Low => 1.0,
        RiskLevel::Medium => 2.0,
        RiskLevel::High => 3.0,
        RiskLevel::VeryHigh => 4.0,
    }
}

/// Ordinal score, half a point higher when psychosocial factors were recorded.
pub fn risk_score(level: RiskLevel, has_psychosocial_factors: bool) -> f64 {
    if has_psychosocial_factors {
        base_score(level) + 0.5
    } else {
        base_score(level)
    }
}

pub fn recommendation_for_score(score: f64) -> &'static str {
    if score <= 1.5 {
        PRESERVE
    } else if score <= 2.5 {
        CONTROL
    } else if score <= 3.5 {
        CORRECT
    } else {
        URGENT
    }
}

pub fn evaluate(assessment: &RiskAssessment) -> Result<RiskOutcome> {
    assessment.validate()?;

    let level = assessment.risk_level;
    let score = risk_score(level, !assessment.factors.trim().is_empty());
    tracing::debug!(level = level.label(), score, "Risk assessment evaluated");

    Ok(RiskOutcome {
        client: assessment.client.clone(),
        sector: assessment.sector.clone(),
        risk_level: level,
        indicator: level.indicator(),
        score,
        recommendation: recommendation_for_score(score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Indicator;
    use crate::utils::error::PricingError;

    fn assessment(client: &str, sector: &str, level: RiskLevel) -> RiskAssessment {
        RiskAssessment {
            client: client.to_string(),
            sector: sector.to_string(),
            risk_level: level,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_assessment_gets_orange_for_high() {
        let outcome = evaluate(&assessment("Acme", "Ops", RiskLevel::High)).unwrap();
        assert_eq!(outcome.indicator, Indicator::Orange);
        assert_eq!(outcome.score, 3.0);
        assert_eq!(outcome.recommendation, CORRECT);
    }

    #[test]
    fn test_missing_sector_is_invalid() {
        let err = evaluate(&assessment("Acme", "", RiskLevel::Low)).unwrap_err();
        assert!(matches!(err, PricingError::MissingRequiredField { ref field } if field == "sector"));
        assert!(!assessment("", "Ops", RiskLevel::Low).is_valid());
    }

    #[test]
    fn test_whitespace_sector_counts_as_filled() {
        let outcome = evaluate(&assessment("Acme", "  ", RiskLevel::High)).unwrap();
        assert_eq!(outcome.indicator, Indicator::Orange);
    }

    #[test]
    fn test_factors_add_half_point() {
        assert_eq!(risk_score(RiskLevel::Medium, false), 2.0);
        assert_eq!(risk_score(RiskLevel::Medium, true), 2.5);

        let mut a = assessment("Acme", "Ops", RiskLevel::VeryHigh);
        a.factors = "Excessive overtime".to_string();
        let outcome = evaluate(&a).unwrap();
        assert_eq!(outcome.score, 4.5);
        assert_eq!(outcome.indicator, Indicator::Red);
    }

    #[test]
    fn test_recommendation_bands() {
        assert_eq!(recommendation_for_score(1.0), PRESERVE);
        assert_eq!(recommendation_for_score(1.5), PRESERVE);
        assert_eq!(recommendation_for_score(2.0), CONTROL);
        assert_eq!(recommendation_for_score(2.5), CONTROL);
        assert_eq!(recommendation_for_score(3.5), CORRECT);
        assert_eq!(recommendation_for_score(4.0), URGENT);
    }
}
