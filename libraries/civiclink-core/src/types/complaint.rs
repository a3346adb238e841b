/// Complaint record and its closed value sets
use crate::error::CoreError;
use crate::types::{ComplaintId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "in-progress", alias = "in_progress")]
    InProgress,
    #[serde(alias = "resolved")]
    Resolved,
    #[serde(alias = "rejected")]
    Rejected,
}

impl Status {
    /// All statuses, in display order
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Resolved, Self::Rejected];

    /// Wire representation used by the backend
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::invalid_value("status", s)),
        }
    }
}

/// Urgency assigned by the reporting citizen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire representation used by the backend
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Priority",
            Self::Medium => "Medium Priority",
            Self::High => "High Priority",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Minor issues that can wait",
            Self::Medium => "Issues that need attention soon",
            Self::High => "Urgent issues requiring immediate attention",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::invalid_value("priority", s)),
        }
    }
}

/// Kind of infrastructure a complaint is about
///
/// The backend stores categories as free text, so anything outside the known
/// set is read back as [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Roads,
    Water,
    Electricity,
    Parks,
    Waste,
    Other,
}

impl Category {
    /// All categories, in form order
    pub const ALL: [Self; 6] = [
        Self::Roads,
        Self::Water,
        Self::Electricity,
        Self::Parks,
        Self::Waste,
        Self::Other,
    ];

    /// Wire representation used by the backend
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roads => "roads",
            Self::Water => "water",
            Self::Electricity => "electricity",
            Self::Parks => "parks",
            Self::Waste => "waste",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Roads => "Roads & Transportation",
            Self::Water => "Water Supply",
            Self::Electricity => "Electricity",
            Self::Parks => "Parks & Recreation",
            Self::Waste => "Waste Management",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::invalid_value("category", s))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Other)
    }
}

/// A citizen-submitted record of a local civic issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub upvotes: u32,
    /// Reference to an uploaded photo, if one was attached
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Creation timestamp as issued by the backend
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Complaint {
    /// Register one upvote locally.
    ///
    /// Saturates instead of wrapping so the count never decreases.
    pub fn upvote(&mut self) {
        self.upvotes = self.upvotes.saturating_add(1);
    }

    /// Replace this record with a newer server copy.
    ///
    /// The upvote count is kept monotonic: a stale copy with fewer votes does
    /// not roll the local count back.
    pub fn merge(&mut self, newer: Complaint) {
        let upvotes = self.upvotes.max(newer.upvotes);
        *self = newer;
        self.upvotes = upvotes;
    }

    /// Case-insensitive match of an already-lowercased term against title,
    /// description and location.
    pub(crate) fn matches_lowercase(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self.description.to_lowercase().contains(term)
            || self.location.to_lowercase().contains(term)
    }
}
