//! Main CivicLink client.

use crate::auth::AuthClient;
use crate::complaints::ComplaintClient;
use crate::error::{ClientError, Result};
use crate::session::{Session, SessionStore};
use crate::types::{AuthResponse, ClientConfig};
use civiclink_core::{Complaint, ComplaintId, NewComplaint, Profile, Status};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Main client for interacting with a CivicLink backend.
///
/// The client owns the application's session context: it is hydrated from a
/// [`SessionStore`] at startup, updated on login/signup and cleared on
/// logout. Authentication checks never touch the network.
///
/// # Example
///
/// ```ignore
/// use civiclink_client::{CivicClient, ClientConfig, FileSessionStore};
/// use std::sync::Arc;
///
/// let store = Arc::new(FileSessionStore::new(".civiclink"));
/// let client = CivicClient::new(ClientConfig::default(), store)?;
/// client.hydrate().await?;
///
/// if !client.is_authenticated().await {
///     client.login("jane@example.com", "secret").await?;
/// }
///
/// let complaints = client.list_complaints().await?;
/// println!("{} complaints", complaints.len());
/// ```
#[derive(Clone)]
pub struct CivicClient {
    http: Client,
    base_url: Url,
    session: Arc<RwLock<Session>>,
    store: Arc<dyn SessionStore>,
}

impl CivicClient {
    /// Create a new client with the given configuration and session store.
    ///
    /// The session starts empty; call [`hydrate`](Self::hydrate) to restore
    /// a persisted one.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("CivicLink/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            http,
            base_url,
            session: Arc::new(RwLock::new(Session::default())),
            store,
        })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Restore the persisted session into memory.
    pub async fn hydrate(&self) -> Result<Session> {
        let restored = self.store.load().await?;
        debug!(authenticated = restored.is_authenticated(), "Session hydrated");

        *self.session.write().await = restored.clone();
        Ok(restored)
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Whether a user is signed in. No network call is made.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// The signed-in user's profile, if any. No network call is made.
    pub async fn current_user(&self) -> Option<Profile> {
        self.session.read().await.user.clone()
    }

    /// Login with email and password.
    ///
    /// On success the profile (and token, when issued) is persisted and used
    /// for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let response = AuthClient::new(&self.http, &self.base_url)
            .login(email, password)
            .await?;

        self.persist(&response).await?;
        Ok(response)
    }

    /// Register a new account and sign in as it.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: Option<&str>,
    ) -> Result<AuthResponse> {
        let response = AuthClient::new(&self.http, &self.base_url)
            .signup(email, password, full_name, phone)
            .await?;

        self.persist(&response).await?;
        Ok(response)
    }

    async fn persist(&self, response: &AuthResponse) -> Result<()> {
        match &response.token {
            Some(token) => self.store.save_token(token).await?,
            None => self.store.remove_token().await?,
        }
        self.store.save_user(&response.user).await?;

        *self.session.write().await = Session::new(response.token.clone(), response.user.clone());
        Ok(())
    }

    /// Clear the session, in memory and in storage.
    pub async fn logout(&self) -> Result<()> {
        *self.session.write().await = Session::default();
        self.store.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Get a complaint client bound to the current session.
    pub async fn complaints(&self) -> ComplaintClientHandle {
        let session = self.session.read().await;
        ComplaintClientHandle {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: session.token.clone(),
            user_email: session.user_email().map(str::to_string),
        }
    }

    /// Every complaint on the server.
    pub async fn list_complaints(&self) -> Result<Vec<Complaint>> {
        self.complaints().await.client().list().await
    }

    /// Complaints submitted by the signed-in user.
    pub async fn list_my_complaints(&self) -> Result<Vec<Complaint>> {
        self.complaints().await.client().list_mine().await
    }

    pub async fn get_complaint(&self, id: &ComplaintId) -> Result<Complaint> {
        self.complaints().await.client().get(id).await
    }

    /// Submit a validated complaint on behalf of the signed-in user.
    ///
    /// Fails with [`ClientError::AuthRequired`] when nobody is signed in.
    pub async fn create_complaint(&self, complaint: &NewComplaint) -> Result<Complaint> {
        self.complaints().await.client().create(complaint).await
    }

    pub async fn update_status(&self, id: &ComplaintId, status: Status) -> Result<Complaint> {
        self.complaints()
            .await
            .client()
            .update_status(id, status)
            .await
    }

    pub async fn upvote(&self, id: &ComplaintId) -> Result<Complaint> {
        self.complaints().await.client().upvote(id).await
    }

    /// Check that the backend is reachable; returns its greeting.
    pub async fn ping(&self) -> Result<String> {
        self.complaints().await.client().ping().await
    }

    /// Ask the backend to seed its sample complaints.
    pub async fn populate_sample_data(&self) -> Result<String> {
        self.complaints().await.client().populate_sample_data().await
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", trimmed, e)))
}

/// Handle for complaint operations.
///
/// Holds a snapshot of the session taken when it was created, so a logout
/// in the meantime does not affect requests made through it.
pub struct ComplaintClientHandle {
    http: Client,
    base_url: Url,
    token: Option<String>,
    user_email: Option<String>,
}

impl ComplaintClientHandle {
    /// Get the complaint client.
    pub fn client(&self) -> ComplaintClient<'_> {
        ComplaintClient::new(
            &self.http,
            &self.base_url,
            self.token.as_deref(),
            self.user_email.as_deref(),
        )
    }
}
