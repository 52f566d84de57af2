//! Errors for caller mistakes.
//!
//! Business-rule rejections are never errors; they come back as
//! [`ValidationOutcome::Rejected`](crate::validation::ValidationOutcome).
//! `RosterError` covers inputs that indicate a programming error upstream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster must be a JSON array, got {0}")]
    NotAList(&'static str),
    #[error("roster is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
