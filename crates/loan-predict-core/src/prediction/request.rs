//! Typed loan request and its construction from raw form fields.
//!
//! Form submissions arrive as optional strings. They are parsed exactly once
//! into a [`LoanRequest`]; past this boundary every field is numeric.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanPredictError;
use crate::time_value;
use crate::types::{Money, Percent};
use crate::LoanPredictResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan parameters submitted for prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Amount borrowed, currency units.
    pub principal: Money,
    /// Annual interest rate in percent (10 = 10% per year).
    pub annual_rate_percent: Percent,
    /// Whole years to repay.
    pub tenure_years: i64,
    /// Bureau credit score, conventionally 300-850.
    pub credit_score: i64,
}

/// Raw loan fields exactly as a form submits them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanApplicationForm {
    pub loan_amount: Option<String>,
    pub annual_interest_rate: Option<String>,
    pub loan_tenure_years: Option<String>,
    pub credit_score: Option<String>,
}

// ---------------------------------------------------------------------------
// LoanRequest
// ---------------------------------------------------------------------------

impl LoanRequest {
    pub fn new(
        principal: Money,
        annual_rate_percent: Percent,
        tenure_years: i64,
        credit_score: i64,
    ) -> Self {
        LoanRequest {
            principal,
            annual_rate_percent,
            tenure_years,
            credit_score,
        }
    }

    /// Reject requests outside the domain the amortization formula accepts.
    pub fn validate(&self) -> LoanPredictResult<()> {
        if self.tenure_years <= 0 {
            return Err(LoanPredictError::invalid(
                "tenure_years",
                "Tenure must be at least one year",
            ));
        }
        if self.principal <= Decimal::ZERO {
            return Err(LoanPredictError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LoanPredictError::invalid(
                "annual_rate_percent",
                "Annual rate cannot be negative",
            ));
        }
        Ok(())
    }

    /// Number of monthly installments.
    pub fn months(&self) -> LoanPredictResult<u32> {
        time_value::months_in(self.tenure_years)
    }
}

impl TryFrom<&LoanApplicationForm> for LoanRequest {
    type Error = LoanPredictError;

    fn try_from(form: &LoanApplicationForm) -> Result<Self, Self::Error> {
        let principal = parse_decimal("loan_amount", form.loan_amount.as_deref())?;
        let annual_rate_percent =
            parse_decimal("annual_interest_rate", form.annual_interest_rate.as_deref())?;
        let tenure_years = parse_integer("loan_tenure_years", form.loan_tenure_years.as_deref())?;
        let credit_score = parse_integer("credit_score", form.credit_score.as_deref())?;

        let request = LoanRequest::new(principal, annual_rate_percent, tenure_years, credit_score);
        request.validate()?;
        Ok(request)
    }
}

impl TryFrom<LoanApplicationForm> for LoanRequest {
    type Error = LoanPredictError;

    fn try_from(form: LoanApplicationForm) -> Result<Self, Self::Error> {
        LoanRequest::try_from(&form)
    }
}

// ---------------------------------------------------------------------------
// Field parsing
// ---------------------------------------------------------------------------

fn required<'a>(field: &str, raw: Option<&'a str>) -> LoanPredictResult<&'a str> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoanPredictError::invalid(field, "Field is required")),
    }
}

fn parse_decimal(field: &str, raw: Option<&str>) -> LoanPredictResult<Decimal> {
    let value = required(field, raw)?;
    value
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| LoanPredictError::invalid(field, format!("'{value}' is not a number")))
}

fn parse_integer(field: &str, raw: Option<&str>) -> LoanPredictResult<i64> {
    let value = required(field, raw)?;
    value
        .parse::<i64>()
        .map_err(|_| LoanPredictError::invalid(field, format!("'{value}' is not a whole number")))
}
