//! CivicLink Client
//!
//! HTTP client library for the CivicLink civic-issue reporting backend.
//!
//! # Features
//!
//! - **Authentication**: Login/signup by email, session persisted to a store
//! - **Complaints**: List, fetch, submit (JSON or multipart), update status, upvote
//! - **Dashboard**: Timeout-bounded loading with sample-data fallback, filters, stats
//! - **Auth gate**: Decide whether a view may render for the current session
//!
//! # Example
//!
//! ```ignore
//! use civiclink_client::{CivicClient, ClientConfig, Dashboard, FileSessionStore, ListScope};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileSessionStore::new(".civiclink"));
//!     let client = CivicClient::new(ClientConfig::default(), store)?;
//!     client.hydrate().await?;
//!
//!     client.login("jane@example.com", "secret").await?;
//!
//!     let mut dashboard = Dashboard::default();
//!     dashboard.load(&client, ListScope::All).await;
//!     if let Some(warning) = dashboard.warning() {
//!         eprintln!("{}", warning);
//!     }
//!     println!("{} reports", dashboard.stats().total);
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod complaints;
mod dashboard;
mod error;
mod gate;
mod response;
mod session;
mod submit;
mod types;

// Re-export main types
pub use client::{CivicClient, ComplaintClientHandle};
pub use dashboard::{Dashboard, ListScope, LoadState, DEFAULT_FETCH_TIMEOUT, FALLBACK_WARNING};
pub use error::{ClientError, Result, GENERIC_REQUEST_FAILURE};
pub use gate::{AuthGate, GateDecision, View};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, TOKEN_KEY, USER_KEY};
pub use submit::{submit, RetryPolicy};
pub use types::{AuthResponse, ClientConfig, DEFAULT_BASE_URL};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use complaints::ComplaintClient;
