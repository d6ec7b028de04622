// src/error.rs
//! Error taxonomy shared by both pipelines.

use thiserror::Error;

/// Every error is fatal to the current invocation: there is no retry and no
/// partial write anywhere in the pipelines.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("missing configuration: {0}")]
    Configuration(String),

    #[error("missing required fields in issue form: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("model response violates schema: {0}")]
    SchemaViolation(String),

    #[error("remote call failed: {0}")]
    RemoteCall(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::RemoteCall(err.to_string())
    }
}
