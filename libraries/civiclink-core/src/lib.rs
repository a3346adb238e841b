//! CivicLink Core
//!
//! Platform-agnostic domain types, filtering and form validation for CivicLink,
//! a civic-issue reporting client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Complaint`, `Profile`, `Status`, `Priority`, `Category`
//! - **Filtering**: `ComplaintFilter` and the derived `ComplaintStats`
//! - **Forms**: `ComplaintDraft` validation and in-memory `Attachment`s
//! - **Sample Data**: the fixed dataset shown when the backend is unreachable
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use civiclink_core::{sample, ComplaintFilter, ComplaintStats, Status};
//!
//! let complaints = sample::fallback_complaints("user@example.com");
//!
//! let filter = ComplaintFilter::new().with_status(Status::Pending);
//! let visible = filter.apply(&complaints);
//! assert_eq!(visible.len(), 1);
//!
//! let stats = ComplaintStats::from_complaints(&complaints);
//! assert_eq!(stats.total, 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod form;
pub mod sample;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use filter::{ComplaintFilter, ComplaintStats};
pub use form::{Attachment, ComplaintDraft, FieldError, FormError, NewComplaint};

pub use types::{Category, Complaint, ComplaintId, Priority, Profile, Status, UserId};
