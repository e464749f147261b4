//! Month-by-month amortization schedule for a level-payment loan.
//!
//! Every month pays the rounded installment. Interest accrues on the opening
//! balance at the monthly rate and is rounded to cents; the remainder of the
//! payment retires principal. The last payment absorbs rounding drift so the
//! loan closes at exactly zero.

use serde::{Deserialize, Serialize};

use crate::error::LoanPredictError;
use crate::prediction::LoanRequest;
use crate::time_value::{monthly_rate, overflow, pmt, round_currency};
use crate::types::Money;
use crate::LoanPredictResult;

/// Longest schedule produced: 100 years of monthly rows.
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal_repaid: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub installment_amount: Money,
    pub months: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub rows: Vec<AmortizationRow>,
}

/// Build the full repayment schedule for a request.
pub fn amortization_schedule(request: &LoanRequest) -> LoanPredictResult<AmortizationSchedule> {
    request.validate()?;

    let rate = monthly_rate(request.annual_rate_percent);
    let months = request.months()?;
    if months > MAX_SCHEDULE_MONTHS {
        return Err(LoanPredictError::InvalidInput {
            field: "tenure_years".into(),
            reason: format!(
                "Schedules are limited to {} years",
                MAX_SCHEDULE_MONTHS / 12
            ),
        });
    }
    let installment = round_currency(pmt(rate, months, request.principal)?);

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = request.principal;

    for month in 1..=months {
        let opening = balance;
        let interest = round_currency(
            opening
                .checked_mul(rate)
                .ok_or_else(|| overflow("monthly interest"))?,
        );
        let due = opening
            .checked_add(interest)
            .ok_or_else(|| overflow("amount due"))?;

        let payment = if month == months || installment > due {
            due
        } else {
            installment
        };
        let principal_repaid = payment - interest;
        balance = opening - principal_repaid;

        rows.push(AmortizationRow {
            month,
            opening_balance: opening,
            payment,
            interest,
            principal_repaid,
            closing_balance: balance,
        });
    }

    let total_paid = checked_total(rows.iter().map(|r| r.payment), "total paid")?;
    let total_interest = checked_total(rows.iter().map(|r| r.interest), "total interest")?;

    Ok(AmortizationSchedule {
        installment_amount: installment,
        months,
        total_paid,
        total_interest,
        rows,
    })
}

fn checked_total(
    mut amounts: impl Iterator<Item = Money>,
    what: &str,
) -> LoanPredictResult<Money> {
    amounts.try_fold(Money::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| overflow(what))
    })
}
