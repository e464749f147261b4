use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::request::LoanRequest;
use super::risk::{classify, risk_factors, RiskCategory, RiskPolicy};
use crate::error::LoanPredictError;
use crate::time_value::{monthly_rate, overflow, pmt, round_currency};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanPredictResult;

const CONVENTIONAL_MIN_CREDIT_SCORE: i64 = 300;
const CONVENTIONAL_MAX_CREDIT_SCORE: i64 = 850;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Monthly installment, rounded to cents.
    pub installment_amount: Money,
    pub risk_category: RiskCategory,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Predict the monthly installment and risk category for a loan.
pub fn predict(request: &LoanRequest) -> LoanPredictResult<PredictionResult> {
    predict_with_policy(request, &RiskPolicy::default())
}

/// [`predict`] with caller-supplied risk thresholds.
pub fn predict_with_policy(
    request: &LoanRequest,
    policy: &RiskPolicy,
) -> LoanPredictResult<PredictionResult> {
    request.validate()?;

    let rate = monthly_rate(request.annual_rate_percent);
    let periods = request.months()?;
    let installment = round_currency(pmt(rate, periods, request.principal)?);

    // A tiny principal spread over a long tenure rounds away to nothing.
    if installment <= Decimal::ZERO {
        return Err(LoanPredictError::InvalidInput {
            field: "principal, tenure_years".into(),
            reason: "Installment rounds to zero; principal too small for this tenure".into(),
        });
    }

    Ok(PredictionResult {
        installment_amount: installment,
        risk_category: classify(request, policy),
    })
}

/// Run [`predict`] and wrap the result with methodology, assumptions and
/// warnings for reporting.
pub fn evaluate(request: &LoanRequest) -> LoanPredictResult<ComputationOutput<PredictionResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let policy = RiskPolicy::default();

    let result = predict_with_policy(request, &policy)?;
    let factors = risk_factors(request, &policy);

    if request.annual_rate_percent.is_zero() {
        warnings.push("Annual rate is zero; installment is straight-line principal / months.".into());
    }
    if !(CONVENTIONAL_MIN_CREDIT_SCORE..=CONVENTIONAL_MAX_CREDIT_SCORE)
        .contains(&request.credit_score)
    {
        warnings.push(format!(
            "Credit score {} is outside the conventional {}-{} range.",
            request.credit_score, CONVENTIONAL_MIN_CREDIT_SCORE, CONVENTIONAL_MAX_CREDIT_SCORE
        ));
    }

    let monthly = monthly_rate(request.annual_rate_percent);
    let periods = request.months()?;
    let total_repayment = result
        .installment_amount
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| overflow("total repayment"))?;
    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "monthly_rate": monthly.round_dp(10),
        "periods": periods,
        "rounding": "2dp, ties away from zero",
        "risk_policy": policy,
        "risk_factors": factors,
        "risk_score": factors.score(),
        "total_repayment": total_repayment,
    });

    Ok(with_metadata(
        "Level-payment amortization (EMI) with rule-based risk scoring",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
