//! Demo data shown when the backend cannot be reached.

use crate::types::{Category, Complaint, ComplaintId, Priority, Status};
use chrono::{SecondsFormat, Utc};

/// Email used for demo records when nobody is signed in
pub const DEFAULT_SAMPLE_EMAIL: &str = "user@example.com";

/// The fixed two-record dataset used by the dashboard fallback.
///
/// Both records are attributed to `user_email` and stamped with the current
/// time.
pub fn fallback_complaints(user_email: &str) -> Vec<Complaint> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    vec![
        Complaint {
            id: ComplaintId::new("1"),
            title: "Broken Street Light".to_string(),
            description: "Street light on Main St is not working".to_string(),
            category: Category::Electricity,
            location: "Main Street".to_string(),
            status: Status::Pending,
            priority: Priority::Medium,
            upvotes: 5,
            photo_url: None,
            created_at: now.clone(),
            updated_at: now.clone(),
            user_email: Some(user_email.to_string()),
            user_id: None,
        },
        Complaint {
            id: ComplaintId::new("2"),
            title: "Pothole on Oak Avenue".to_string(),
            description: "Large pothole causing damage to vehicles".to_string(),
            category: Category::Roads,
            location: "Oak Avenue".to_string(),
            status: Status::InProgress,
            priority: Priority::High,
            upvotes: 12,
            photo_url: None,
            created_at: now.clone(),
            updated_at: now,
            user_email: Some(user_email.to_string()),
            user_id: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_dataset_shape() {
        let complaints = fallback_complaints("me@example.com");
        assert_eq!(complaints.len(), 2);
        assert_eq!(complaints[0].status, Status::Pending);
        assert_eq!(complaints[1].status, Status::InProgress);
        assert!(complaints
            .iter()
            .all(|c| c.user_email.as_deref() == Some("me@example.com")));
    }
}
