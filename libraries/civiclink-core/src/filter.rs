//! Dashboard filtering and derived counts.
//!
//! Filtering is pure and order-preserving. Counts are always taken over the
//! full collection, never over a filtered view.

use crate::types::{Category, Complaint, Status};

/// Search, status and category predicates applied together.
///
/// A `None` status or category means "all". An empty or whitespace-only
/// search term is inactive; any other term is matched as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub category: Option<Category>,
}

impl ComplaintFilter {
    /// Filter that lets everything through
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.status.is_none() && self.category.is_none()
    }

    /// Lowercased term; surrounding whitespace is part of the match.
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Check a single record against every active predicate.
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.matches_with(complaint, self.search_term().as_deref())
    }

    fn matches_with(&self, complaint: &Complaint, term: Option<&str>) -> bool {
        term.map_or(true, |t| complaint.matches_lowercase(t))
            && self.status.map_or(true, |s| complaint.status == s)
            && self.category.map_or(true, |c| complaint.category == c)
    }

    /// Records passing all active predicates, in their original order.
    pub fn apply<'a>(&self, complaints: &'a [Complaint]) -> Vec<&'a Complaint> {
        let term = self.search_term();
        complaints
            .iter()
            .filter(|c| self.matches_with(c, term.as_deref()))
            .collect()
    }
}

/// Headline counts shown above the complaint list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl ComplaintStats {
    /// Count over the whole (unfiltered) collection.
    pub fn from_complaints(complaints: &[Complaint]) -> Self {
        complaints
            .iter()
            .fold(Self::default(), |mut stats, complaint| {
                stats.total += 1;
                match complaint.status {
                    Status::Pending => stats.pending += 1,
                    Status::InProgress => stats.in_progress += 1,
                    Status::Resolved => stats.resolved += 1,
                    Status::Rejected => {}
                }
                stats
            })
    }
}
