// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Application error types shared across the client core.

/// Application error type.
///
/// Every operation in the core returns one of these; nothing here is fatal
/// to the process. Location and network failures are recovered by the user
/// re-triggering, auth failures by logging in again.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Could not obtain a location fix: {0}")]
    LocationUnavailable(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend rejected request (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures that mean the session is missing or rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::Unauthenticated)
    }

    /// True for failures a user can recover from by simply trying again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::LocationUnavailable(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Network("request timed out".to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, AppError>;
