//! Complaint submission with bounded retry.
//!
//! Creating a complaint is not idempotent, so only failures where the request
//! never left the client are retried. A timeout or a dropped connection is
//! returned at once and flagged as having an unknown outcome. The final
//! failure is always handed back to the caller.

use crate::client::CivicClient;
use crate::error::{ClientError, Result};
use civiclink_core::{Complaint, ComplaintDraft};
use std::time::Duration;
use tracing::{info, warn};

/// How often and how patiently to retry a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (at least 1)
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retry
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Validate a draft and submit it.
pub async fn submit(
    client: &CivicClient,
    draft: &ComplaintDraft,
    policy: &RetryPolicy,
) -> Result<Complaint> {
    let complaint = draft.validate()?;
    let max_attempts = policy.max_attempts.max(1);

    let mut attempt = 1;
    loop {
        match client.create_complaint(&complaint).await {
            Ok(created) => {
                if attempt > 1 {
                    info!(attempt, complaint_id = %created.id, "Submission succeeded after retry");
                }
                return Ok(created);
            }
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!(
                    error = %e,
                    attempt,
                    max_attempts,
                    "Submission failed, retrying in {:?}",
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(error = %e, attempt, "Submission failed");
                return Err(flag_unknown_outcome(e));
            }
        }
    }
}

const UNKNOWN_OUTCOME: &str =
    "the complaint may already have been filed; check the dashboard before resubmitting";

fn flag_unknown_outcome(err: ClientError) -> ClientError {
    match err {
        ClientError::Timeout(message) => {
            ClientError::Timeout(format!("{}; {}", message, UNKNOWN_OUTCOME))
        }
        ClientError::ConnectionLost(message) => {
            ClientError::ConnectionLost(format!("{}; {}", message, UNKNOWN_OUTCOME))
        }
        other => other,
    }
}
