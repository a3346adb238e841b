//! Types for CivicLink API requests and responses.

use civiclink_core::{Category, Priority, Profile, Status};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Configuration for connecting to a CivicLink backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix
    /// (e.g., "https://civic.example.com/api")
    pub base_url: String,
    /// Overall timeout for a single request
    pub request_timeout: Duration,
    /// Timeout for establishing the connection
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for the signup endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response from login and signup.
///
/// Token-less deployments identify the user by profile alone.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: Profile,
}

// =============================================================================
// Complaint Types
// =============================================================================

/// JSON body for creating a complaint without a photo.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub priority: Priority,
    pub user_email: String,
}

/// Body for the status update endpoint.
#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: Status,
}

/// Plain `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body returned by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    /// Best available explanation, if the server gave one
    pub fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
    }
}
