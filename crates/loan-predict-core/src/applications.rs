//! Append-only log of submitted loan applications.
//!
//! The log records each accepted request with its prediction, owner and
//! timestamp. Requests that fail validation never reach the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::error::LoanPredictError;
use crate::prediction::{predict, LoanApplicationForm, LoanRequest, PredictionResult};
use crate::LoanPredictResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Identity of an already-authenticated applicant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl From<&str> for ApplicantId {
    fn from(id: &str) -> Self {
        ApplicantId(id.to_string())
    }
}

impl std::fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: u64,
    pub applicant: ApplicantId,
    pub request: LoanRequest,
    pub result: PredictionResult,
    pub created_at: DateTime<Utc>,
}

/// A record waiting for the log to assign its id.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub applicant: ApplicantId,
    pub request: LoanRequest,
    pub result: PredictionResult,
    pub created_at: DateTime<Utc>,
}

pub trait ApplicationLog: Send + Sync {
    /// Store a record and return it with its assigned id.
    fn append(&self, application: NewApplication) -> LoanPredictResult<LoanApplication>;

    /// Every application submitted by `applicant`, oldest first.
    fn list_for(&self, applicant: &ApplicantId) -> LoanPredictResult<Vec<LoanApplication>>;

    fn len(&self) -> LoanPredictResult<usize>;

    fn is_empty(&self) -> LoanPredictResult<bool> {
        Ok(self.len()? == 0)
    }
}

// ---------------------------------------------------------------------------
// In-memory log
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryApplicationLog {
    records: RwLock<Vec<LoanApplication>>,
}

impl InMemoryApplicationLog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> LoanPredictError {
    LoanPredictError::StoreUnavailable("application log lock poisoned".into())
}

impl ApplicationLog for InMemoryApplicationLog {
    fn append(&self, application: NewApplication) -> LoanPredictResult<LoanApplication> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = LoanApplication {
            id: records.len() as u64 + 1,
            applicant: application.applicant,
            request: application.request,
            result: application.result,
            created_at: application.created_at,
        };
        records.push(record.clone());
        Ok(record)
    }

    fn list_for(&self, applicant: &ApplicantId) -> LoanPredictResult<Vec<LoanApplication>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .filter(|r| &r.applicant == applicant)
            .cloned()
            .collect())
    }

    fn len(&self) -> LoanPredictResult<usize> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Parse a form, predict, and record the outcome for `applicant`.
pub fn submit(
    log: &dyn ApplicationLog,
    applicant: &ApplicantId,
    form: &LoanApplicationForm,
) -> LoanPredictResult<LoanApplication> {
    let request = LoanRequest::try_from(form)?;
    let result = predict(&request)?;

    log.append(NewApplication {
        applicant: applicant.clone(),
        request,
        result,
        created_at: Utc::now(),
    })
}
