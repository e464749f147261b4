pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "prediction")]
pub mod prediction;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "applications")]
pub mod applications;

pub use error::LoanPredictError;
pub use types::*;

/// Standard result type for all loan-predict operations
pub type LoanPredictResult<T> = Result<T, LoanPredictError>;
