use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use loan_predict_core::prediction::{self, LoanRequest, RiskCategory};
use loan_predict_core::schedule;

use crate::input;

/// Loan parameters shared by `predict` and `schedule`
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, alias = "loan-amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (10 = 10%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan tenure in whole years
    #[arg(long, alias = "years")]
    pub tenure_years: Option<i64>,

    /// Applicant credit score
    #[arg(long)]
    pub credit_score: Option<i64>,
}

/// Arguments for batch prediction
#[derive(Args)]
pub struct BatchArgs {
    /// Path to a JSON or YAML array of loan requests
    #[arg(long)]
    pub input: Option<String>,
}

/// One line of batch output.
#[derive(Serialize)]
struct BatchRow {
    index: usize,
    installment_amount: Option<Decimal>,
    risk_category: Option<RiskCategory>,
    error: Option<String>,
}

pub fn run_predict(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(args)?;
    let result = prediction::evaluate(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(args)?;
    let result = schedule::amortization_schedule(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_batch(args: BatchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let requests: Vec<LoanRequest> = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for batch prediction".into());
    };

    let rows: Vec<BatchRow> = requests
        .iter()
        .enumerate()
        .map(|(index, request)| match prediction::predict(request) {
            Ok(result) => BatchRow {
                index,
                installment_amount: Some(result.installment_amount),
                risk_category: Some(result.risk_category),
                error: None,
            },
            Err(e) => BatchRow {
                index,
                installment_amount: None,
                risk_category: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    Ok(serde_json::to_value(rows)?)
}

fn resolve_request(args: LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(data);
    }

    Ok(LoanRequest::new(
        args.principal
            .ok_or("--principal is required (or provide --input)")?,
        args.annual_rate
            .ok_or("--annual-rate is required (or provide --input)")?,
        args.tenure_years
            .ok_or("--tenure-years is required (or provide --input)")?,
        args.credit_score
            .ok_or("--credit-score is required (or provide --input)")?,
    ))
}
