//! Plain-text rendering for terminal output.

use civiclink_core::{Complaint, ComplaintStats, Profile};
use std::fmt::Write;

/// Dashboard summary: stats line, optional warning, then one row per complaint.
pub fn render_dashboard(
    stats: ComplaintStats,
    warning: Option<&str>,
    complaints: &[&Complaint],
) -> String {
    let mut out = String::new();

    if let Some(warning) = warning {
        let _ = writeln!(out, "! {}", warning);
    }

    let _ = writeln!(
        out,
        "Total: {}  Pending: {}  In Progress: {}  Resolved: {}",
        stats.total, stats.pending, stats.in_progress, stats.resolved
    );

    if complaints.is_empty() {
        out.push_str("No complaints match.\n");
        return out;
    }

    out.push('\n');
    for complaint in complaints {
        let _ = writeln!(
            out,
            "[{}] {:<11} {:<6} {:<11} ^{:<4} {}",
            complaint.id,
            complaint.status.label(),
            complaint.priority.label(),
            complaint.category.label(),
            complaint.upvotes,
            complaint.title
        );
    }

    out
}

pub fn render_complaint(complaint: &Complaint) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} (#{})", complaint.title, complaint.id);
    let _ = writeln!(out, "  Status:    {}", complaint.status.label());
    let _ = writeln!(
        out,
        "  Priority:  {} - {}",
        complaint.priority.label(),
        complaint.priority.description()
    );
    let _ = writeln!(out, "  Category:  {}", complaint.category.label());
    let _ = writeln!(out, "  Location:  {}", complaint.location);
    let _ = writeln!(out, "  Upvotes:   {}", complaint.upvotes);
    if let Some(email) = &complaint.user_email {
        let _ = writeln!(out, "  Reporter:  {}", email);
    }
    if let Some(photo) = &complaint.photo_url {
        let _ = writeln!(out, "  Photo:     {}", photo);
    }
    if !complaint.created_at.is_empty() {
        let _ = writeln!(out, "  Reported:  {}", complaint.created_at);
    }
    let _ = writeln!(out, "\n{}", complaint.description);

    out
}

pub fn render_profile(profile: &Profile) -> String {
    let mut out = format!("{} <{}>", profile.display_name(), profile.email);
    if let Some(phone) = &profile.phone {
        let _ = write!(out, " tel. {}", phone);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use civiclink_core::sample::fallback_complaints;
    use civiclink_core::UserId;

    #[test]
    fn test_dashboard_lists_rows_and_warning() {
        let complaints = fallback_complaints("jane@example.com");
        let rows: Vec<&Complaint> = complaints.iter().collect();
        let stats = ComplaintStats::from_complaints(&complaints);

        let text = render_dashboard(stats, Some("offline"), &rows);

        assert!(text.starts_with("! offline\n"));
        assert!(text.contains("Total: 2  Pending: 1  In Progress: 1  Resolved: 0"));
        assert!(text.contains("Broken Street Light"));
        assert!(text.contains("Pothole on Oak Avenue"));
    }

    #[test]
    fn test_dashboard_with_no_rows() {
        let text = render_dashboard(ComplaintStats::default(), None, &[]);
        assert!(!text.contains('!'));
        assert!(text.ends_with("No complaints match.\n"));
    }

    #[test]
    fn test_complaint_detail() {
        let complaint = fallback_complaints("jane@example.com").remove(1);
        let text = render_complaint(&complaint);

        assert!(text.starts_with("Pothole on Oak Avenue (#2)"));
        assert!(text.contains("Status:    In Progress"));
        assert!(text.contains("Reporter:  jane@example.com"));
    }

    #[test]
    fn test_profile_line() {
        let profile = Profile {
            id: UserId::new("u1"),
            email: "jane@example.com".to_string(),
            full_name: "Jane Citizen".to_string(),
            phone: Some("555-0100".to_string()),
        };

        assert_eq!(
            render_profile(&profile),
            "Jane Citizen <jane@example.com> tel. 555-0100"
        );
    }
}
