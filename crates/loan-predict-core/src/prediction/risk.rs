//! Rule-based default-risk classification.
//!
//! Each rule that fires adds one point. Only the count matters:
//! 0 -> Low, 1 -> Medium, 2 or more -> High.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::request::LoanRequest;
use crate::types::{Money, Percent};

/// Scores strictly below this add a point.
pub const DEFAULT_MIN_CREDIT_SCORE: i64 = 700;
/// Principals strictly above this add a point.
pub const DEFAULT_MAX_PRINCIPAL: Money = dec!(1_000_000);
/// Annual rates strictly above this add a point.
pub const DEFAULT_MAX_ANNUAL_RATE_PERCENT: Percent = dec!(12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Coarse default-risk label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => RiskCategory::Low,
            1 => RiskCategory::Medium,
            _ => RiskCategory::High,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::Low => write!(f, "Low"),
            RiskCategory::Medium => write!(f, "Medium"),
            RiskCategory::High => write!(f, "High"),
        }
    }
}

/// Thresholds for the three risk rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    pub min_credit_score: i64,
    pub max_principal: Money,
    pub max_annual_rate_percent: Percent,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        RiskPolicy {
            min_credit_score: DEFAULT_MIN_CREDIT_SCORE,
            max_principal: DEFAULT_MAX_PRINCIPAL,
            max_annual_rate_percent: DEFAULT_MAX_ANNUAL_RATE_PERCENT,
        }
    }
}

/// Which rules fired for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub low_credit_score: bool,
    pub large_principal: bool,
    pub high_rate: bool,
}

impl RiskFactors {
    pub fn score(&self) -> u8 {
        [self.low_credit_score, self.large_principal, self.high_rate]
            .iter()
            .filter(|fired| **fired)
            .count() as u8
    }

    pub fn category(&self) -> RiskCategory {
        RiskCategory::from_score(self.score())
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

pub fn risk_factors(request: &LoanRequest, policy: &RiskPolicy) -> RiskFactors {
    RiskFactors {
        low_credit_score: request.credit_score < policy.min_credit_score,
        large_principal: request.principal > policy.max_principal,
        high_rate: request.annual_rate_percent > policy.max_annual_rate_percent,
    }
}

pub fn risk_score(request: &LoanRequest, policy: &RiskPolicy) -> u8 {
    risk_factors(request, policy).score()
}

/// Risk category for a request under `policy`.
pub fn classify(request: &LoanRequest, policy: &RiskPolicy) -> RiskCategory {
    RiskCategory::from_score(risk_score(request, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(principal: Money, rate: Percent, credit_score: i64) -> LoanRequest {
        LoanRequest::new(principal, rate, 5, credit_score)
    }

    #[test]
    fn test_category_from_score() {
        assert_eq!(RiskCategory::from_score(0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(1), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(2), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(3), RiskCategory::High);
    }

    #[test]
    fn test_credit_score_boundary() {
        let policy = RiskPolicy::default();
        assert_eq!(risk_score(&request(dec!(1000), dec!(5), 700), &policy), 0);
        assert_eq!(risk_score(&request(dec!(1000), dec!(5), 699), &policy), 1);
    }

    #[test]
    fn test_principal_boundary() {
        let policy = RiskPolicy::default();
        assert_eq!(risk_score(&request(dec!(1_000_000), dec!(5), 750), &policy), 0);
        assert_eq!(risk_score(&request(dec!(1_000_000.01), dec!(5), 750), &policy), 1);
    }

    #[test]
    fn test_rate_boundary() {
        let policy = RiskPolicy::default();
        assert_eq!(risk_score(&request(dec!(1000), dec!(12), 750), &policy), 0);
        assert_eq!(risk_score(&request(dec!(1000), dec!(12.01), 750), &policy), 1);
    }

    #[test]
    fn test_all_rules_fire() {
        let factors = risk_factors(
            &request(dec!(2_000_000), dec!(15), 600),
            &RiskPolicy::default(),
        );
        assert!(factors.low_credit_score && factors.large_principal && factors.high_rate);
        assert_eq!(factors.score(), 3);
        assert_eq!(factors.category(), RiskCategory::High);
    }

    #[test]
    fn test_classify_counts_fired_rules() {
        let policy = RiskPolicy::default();
        assert_eq!(classify(&request(dec!(500_000), dec!(10), 760), &policy), RiskCategory::Low);
        assert_eq!(classify(&request(dec!(500_000), dec!(10), 650), &policy), RiskCategory::Medium);
        assert_eq!(classify(&request(dec!(500_000), dec!(13), 650), &policy), RiskCategory::High);
    }

    #[test]
    fn test_custom_policy() {
        let policy = RiskPolicy {
            min_credit_score: 650,
            ..RiskPolicy::default()
        };
        assert_eq!(risk_score(&request(dec!(1000), dec!(5), 680), &policy), 0);
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: RiskPolicy = serde_json::from_str(r#"{"min_credit_score": 720}"#).unwrap();
        assert_eq!(policy.min_credit_score, 720);
        assert_eq!(policy.max_principal, DEFAULT_MAX_PRINCIPAL);
        assert_eq!(policy.max_annual_rate_percent, DEFAULT_MAX_ANNUAL_RATE_PERCENT);
    }

    #[test]
    fn test_display() {
        assert_eq!(RiskCategory::High.to_string(), "High");
    }
}
