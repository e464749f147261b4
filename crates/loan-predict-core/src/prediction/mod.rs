//! Installment and default-risk prediction for a single loan request.

pub mod engine;
pub mod request;
pub mod risk;

pub use engine::{evaluate, predict, predict_with_policy, PredictionResult};
pub use request::{LoanApplicationForm, LoanRequest};
pub use risk::{classify, risk_score, RiskCategory, RiskPolicy};
