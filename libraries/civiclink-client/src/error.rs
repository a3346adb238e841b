//! Error types for the CivicLink client.

use civiclink_core::{ComplaintId, FormError};
use thiserror::Error;

/// Message used when the server gives no reason for a failed request.
pub const GENERIC_REQUEST_FAILURE: &str = "Request failed";

/// Errors that can occur when talking to the CivicLink backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend unreachable; no request was delivered (refused, DNS failure)
    #[error("Network error: {0}")]
    Network(String),

    /// Connection reset or closed after the request was sent
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// Request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Server answered with a non-success status
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Operation needs a signed-in user
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Session(String),

    /// Form input rejected before anything was sent
    #[error(transparent)]
    Validation(#[from] FormError),

    /// Complaint is not in the local collection
    #[error("Unknown complaint: {0}")]
    UnknownComplaint(ComplaintId),

    /// IO error while reading an attachment or the session store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other HTTP client failure (request building, body encoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Failures where the backend never produced an answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::ConnectionLost(_) | Self::Timeout(_)
        )
    }

    /// Failures where the request provably never reached the server.
    ///
    /// Only these are safe to repeat for non-idempotent calls. After a
    /// timeout or a dropped connection the server may already have acted.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// HTTP status of a rejected request, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a failure to send a request.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        // Connect comes first: a connect timeout never reached the server
        if err.is_connect() {
            Self::Network(err.to_string())
        } else if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_request() && err.status().is_none() {
            Self::ConnectionLost(err.to_string())
        } else {
            Self::Http(err)
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_displays_server_message() {
        let err = ClientError::Request {
            status: 400,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::Network("refused".into()).is_transport());
        assert!(ClientError::ConnectionLost("reset".into()).is_transport());
        assert!(ClientError::Timeout("5s".into()).is_transport());
        assert!(!ClientError::AuthRequired.is_transport());
    }

    #[test]
    fn test_only_undelivered_requests_are_retryable() {
        assert!(ClientError::Network("refused".into()).is_retryable());
        assert!(!ClientError::ConnectionLost("reset".into()).is_retryable());
        assert!(!ClientError::Timeout("30s".into()).is_retryable());
        assert!(!ClientError::Request {
            status: 503,
            message: GENERIC_REQUEST_FAILURE.to_string(),
        }
        .is_retryable());
    }
}
