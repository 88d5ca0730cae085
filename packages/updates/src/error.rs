// ABOUTME: Error types for update checks
// ABOUTME: API client failures and the errors surfaced by UpdateChecker

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors talking to the Waypoint API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Errors surfaced by `UpdateChecker::check`
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Update check failed: {0}")]
    Api(#[from] ApiError),
}

pub type UpdateResult<T> = Result<T, UpdateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        assert!(ApiError::Network("connection refused".into()).is_network_error());
        assert!(!ApiError::config("bad url").is_network_error());

        let err = UpdateError::from(ApiError::Status {
            status: 503,
            body: "maintenance".into(),
        });
        assert_eq!(err.to_string(), "Update check failed: HTTP 503: maintenance");
    }
}
