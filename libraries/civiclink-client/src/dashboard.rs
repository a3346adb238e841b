//! Complaint list state behind the dashboard view.
//!
//! Loading never fails: if the backend is slow or unreachable the dashboard
//! switches to the built-in sample data and exposes a warning instead.

use crate::client::CivicClient;
use crate::error::{ClientError, Result};
use civiclink_core::sample::{self, DEFAULT_SAMPLE_EMAIL};
use civiclink_core::{Complaint, ComplaintFilter, ComplaintId, ComplaintStats};
use std::time::Duration;
use tracing::{debug, warn};

/// How long the list fetch may take before falling back.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Banner shown while the sample data is in use.
pub const FALLBACK_WARNING: &str = "Cannot connect to backend. Using demo data.";

/// Which complaints to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    #[default]
    All,
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    /// Showing live data from the backend
    Ready,
    /// Showing sample data after a failed fetch
    Fallback,
}

/// Complaint collection plus the filter applied to it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    complaints: Vec<Complaint>,
    filter: ComplaintFilter,
    state: LoadState,
    warning: Option<String>,
    fetch_timeout: Duration,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

impl Dashboard {
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            complaints: Vec::new(),
            filter: ComplaintFilter::default(),
            state: LoadState::Loading,
            warning: None,
            fetch_timeout,
        }
    }

    /// Fetch the collection, falling back to sample data on any failure.
    pub async fn load(&mut self, client: &CivicClient, scope: ListScope) {
        self.state = LoadState::Loading;

        let fetch = async {
            match scope {
                ListScope::All => client.list_complaints().await,
                ListScope::Mine => client.list_my_complaints().await,
            }
        };

        // Dropping the fetch on expiry aborts the request.
        let result = match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(format!(
                "no response within {:?}",
                self.fetch_timeout
            ))),
        };

        match result {
            Ok(complaints) => {
                debug!(count = complaints.len(), ?scope, "Dashboard loaded");
                self.complaints = complaints;
                self.warning = None;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, ?scope, "Error fetching complaints, using demo data");
                let email = client
                    .current_user()
                    .await
                    .map(|u| u.email)
                    .unwrap_or_else(|| DEFAULT_SAMPLE_EMAIL.to_string());

                self.complaints = sample::fallback_complaints(&email);
                self.warning = Some(FALLBACK_WARNING.to_string());
                self.state = LoadState::Fallback;
            }
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Non-fatal warning to show above the list
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// The full, unfiltered collection
    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn filter(&self) -> &ComplaintFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ComplaintFilter) {
        self.filter = filter;
    }

    /// Complaints passing the current filter, in collection order
    pub fn visible(&self) -> Vec<&Complaint> {
        self.filter.apply(&self.complaints)
    }

    /// Counts over the full collection, independent of the filter
    pub fn stats(&self) -> ComplaintStats {
        ComplaintStats::from_complaints(&self.complaints)
    }

    /// Merge a fresher server copy of a complaint into the collection.
    ///
    /// Unknown complaints are appended.
    pub fn apply_update(&mut self, updated: Complaint) {
        match self.complaints.iter_mut().find(|c| c.id == updated.id) {
            Some(existing) => existing.merge(updated),
            None => self.complaints.push(updated),
        }
    }

    /// Upvote a complaint and fold the result into the collection.
    ///
    /// While showing sample data the vote is only counted locally.
    pub async fn upvote(&mut self, client: &CivicClient, id: &ComplaintId) -> Result<&Complaint> {
        let index = self
            .complaints
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| ClientError::UnknownComplaint(id.clone()))?;

        if self.state == LoadState::Fallback {
            self.complaints[index].upvote();
        } else {
            let updated = client.upvote(id).await?;
            self.complaints[index].merge(updated);
        }

        Ok(&self.complaints[index])
    }
}
