use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::LoanPredictError;
use crate::types::{Money, Percent, Rate};
use crate::LoanPredictResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Decimal places kept on every amount shown to a borrower.
pub const CURRENCY_DP: u32 = 2;

/// Monthly fractional rate from an annual percentage: `annual / (12 * 100)`.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / (Decimal::from(MONTHS_PER_YEAR) * dec!(100))
}

/// Round to cents, ties away from zero.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Level payment that fully amortizes `principal` over `nper` periods at
/// `rate` per period. Unrounded.
///
/// A zero rate falls back to straight-line repayment, which is the limit of
/// the closed form as the rate goes to zero.
pub fn pmt(rate: Rate, nper: u32, principal: Money) -> LoanPredictResult<Money> {
    if nper == 0 {
        return Err(LoanPredictError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate <= dec!(-1) {
        return Err(LoanPredictError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let periods = Decimal::from(nper);

    if rate.is_zero() {
        return Ok(principal / periods);
    }

    let factor = (Decimal::ONE + rate)
        .checked_powi(i64::from(nper))
        .ok_or_else(|| overflow("compound factor"))?;
    let growth = factor - Decimal::ONE;

    // Rate below decimal resolution: (1+r)^n rounds to exactly 1.
    if growth.is_zero() {
        return Ok(principal / periods);
    }

    let annuity = factor.checked_div(growth).ok_or_else(|| overflow("annuity factor"))?;

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_mul(annuity))
        .ok_or_else(|| overflow("payment"))
}

/// Number of monthly periods in a whole-year tenure.
pub fn months_in(tenure_years: i64) -> LoanPredictResult<u32> {
    tenure_years
        .checked_mul(i64::from(MONTHS_PER_YEAR))
        .and_then(|months| u32::try_from(months).ok())
        .ok_or_else(|| LoanPredictError::InvalidInput {
            field: "tenure_years".into(),
            reason: format!("Tenure of {tenure_years} years is out of range"),
        })
}

pub(crate) fn overflow(what: &str) -> LoanPredictError {
    LoanPredictError::InvalidInput {
        field: "annual_rate_percent, tenure_years".into(),
        reason: format!("{what} exceeds decimal range for this rate and tenure"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_pmt_basic() {
        // 100k at 1% per month over 12 months ≈ 8884.88
        let result = pmt(dec!(0.01), 12, dec!(100_000)).unwrap();
        assert_eq!(round_currency(result), dec!(8884.88));
    }

    #[test]
    fn test_pmt_zero_rate_is_straight_line() {
        let result = pmt(Decimal::ZERO, 120, dec!(120_000)).unwrap();
        assert_eq!(result, dec!(1000));
    }

    #[test]
    fn test_pmt_zero_periods_rejected() {
        let err = pmt(dec!(0.01), 0, dec!(1000)).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_pmt_overflow_is_an_error() {
        let err = pmt(dec!(5), 1200, dec!(1_000_000)).unwrap_err();
        assert!(matches!(err, LoanPredictError::InvalidInput { .. }));
    }

    #[test]
    fn test_round_currency_ties_away_from_zero() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(2.355)), dec!(2.36));
        assert_eq!(round_currency(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_months_in() {
        assert_eq!(months_in(5).unwrap(), 60);
        assert!(months_in(i64::MAX).is_err());
    }
}
