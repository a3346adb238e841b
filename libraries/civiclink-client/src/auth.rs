//! Authentication methods for the CivicLink backend.

use crate::error::{ClientError, Result};
use crate::response::{endpoint, read_json};
use crate::types::{AuthResponse, LoginRequest, SignupRequest};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Authentication client for the CivicLink backend.
///
/// Only talks to the server; persisting the returned session is the job of
/// [`CivicClient`](crate::CivicClient).
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = endpoint(self.base_url, &["auth", "login"])?;
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let auth: AuthResponse = read_json(response, "login response").await?;

        info!(
            user_id = %auth.user.id,
            email = %auth.user.email,
            has_token = auth.token.is_some(),
            "Login successful"
        );

        Ok(auth)
    }

    /// Register a new account.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: Option<&str>,
    ) -> Result<AuthResponse> {
        let url = endpoint(self.base_url, &["auth", "signup"])?;
        debug!(url = %url, email = %email, "Attempting signup");

        let request = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            phone: phone.map(str::to_string),
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let auth: AuthResponse = read_json(response, "signup response").await?;

        info!(user_id = %auth.user.id, email = %auth.user.email, "Signup successful");

        Ok(auth)
    }
}
