use napi::Result as NapiResult;
use napi_derive::napi;

use loan_predict_core::prediction::{self, LoanApplicationForm, LoanRequest};
use loan_predict_core::schedule;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_request(input_json: &str) -> NapiResult<LoanRequest> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

#[napi]
pub fn predict_loan(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = prediction::predict(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn evaluate_loan(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = prediction::evaluate(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Accepts the raw form shape (`loan_amount`, `annual_interest_rate`, ...)
/// with string values.
#[napi]
pub fn predict_from_form(form_json: String) -> NapiResult<String> {
    let form: LoanApplicationForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let request = LoanRequest::try_from(&form).map_err(to_napi_error)?;
    let output = prediction::predict(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = schedule::amortization_schedule(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
