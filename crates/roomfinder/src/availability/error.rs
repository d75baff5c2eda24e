//! Error types for availability fetching.

use thiserror::Error;

/// Errors that can occur while fetching one classroom's availability.
///
/// None of these abort a run; the affected classroom simply ends up with an
/// empty schedule.
#[derive(Debug, Error, Clone)]
pub enum AvailabilityError {
    /// Network/HTTP request failed (includes timeouts)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from availability service")]
    UnexpectedStatus { status: u16 },

    /// Response body was not the expected JSON shape
    #[error("Malformed availability response: {message}")]
    Decode { message: String },

    /// The configured endpoint is not a valid URL
    #[error("Invalid endpoint URL: {message}")]
    InvalidEndpoint { message: String },
}

impl AvailabilityError {
    /// Returns true if the failure happened before a response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, AvailabilityError::Network { .. })
    }
}

impl From<reqwest::Error> for AvailabilityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AvailabilityError::Decode {
                message: err.to_string(),
            };
        }
        AvailabilityError::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AvailabilityError {
    fn from(err: serde_json::Error) -> Self {
        AvailabilityError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for AvailabilityError {
    fn from(err: url::ParseError) -> Self {
        AvailabilityError::InvalidEndpoint {
            message: err.to_string(),
        }
    }
}
