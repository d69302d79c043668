//! Error types for the service layer and the HTTP boundary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::composite::IntegrationError;
use crate::recommendation::RepositoryError;
use crate::store::StoreError;

/// Error type for service operations, mapped to HTTP statuses at the edge.
#[derive(Debug)]
pub enum ApiError {
    /// Caller-supplied identifier fails basic validity.
    InvalidInput(String),
    /// The anchor entity does not exist.
    NotFound(String),
    /// Create violates natural-key uniqueness.
    DuplicateKey(String),
    /// Update's version does not match the stored version.
    OptimisticLock(String),
    /// An upstream service could not be reached or answered abnormally.
    UpstreamUnavailable(String),
    /// The storage backend failed.
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            ApiError::NotFound(msg) => write!(f, "not found: {}", msg),
            ApiError::DuplicateKey(msg) => write!(f, "duplicate key: {}", msg),
            ApiError::OptimisticLock(msg) => write!(f, "optimistic lock failure: {}", msg),
            ApiError::UpstreamUnavailable(msg) => write!(f, "upstream unavailable: {}", msg),
            ApiError::Store(e) => write!(f, "storage failure: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateKey { .. } => ApiError::DuplicateKey(err.to_string()),
            RepositoryError::OptimisticLock { .. } => ApiError::OptimisticLock(err.to_string()),
            RepositoryError::Store(e) => ApiError::Store(e),
        }
    }
}

impl From<IntegrationError> for ApiError {
    fn from(err: IntegrationError) -> Self {
        ApiError::UpstreamUnavailable(err.to_string())
    }
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::DuplicateKey(_) => 422,
            ApiError::OptimisticLock(_) => 409,
            ApiError::UpstreamUnavailable(_) => 503,
            ApiError::Store(_) => 500,
        }
    }
}

/// Error body returned by every service on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpErrorInfo {
    pub path: String,
    pub http_status: u16,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl HttpErrorInfo {
    pub fn new(path: &str, http_status: u16, message: String) -> Self {
        Self {
            path: path.to_string(),
            http_status,
            message,
            timestamp: Utc::now(),
        }
    }
}
