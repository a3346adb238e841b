/// Citizen profile
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// A registered citizen.
///
/// Created at signup and read-only afterwards on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    /// Unique per account
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Profile {
    /// Display name, falling back to the email when no name was given
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wire_format() {
        let json = serde_json::json!({
            "id": "42",
            "email": "jane@example.com",
            "fullName": "Jane Citizen"
        });

        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.full_name, "Jane Citizen");
        assert!(profile.phone.is_none());

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["fullName"], "Jane Citizen");
        assert!(back.get("phone").is_none());
    }

    #[test]
    fn test_display_name_fallback() {
        let profile = Profile {
            id: UserId::new("1"),
            email: "anon@example.com".to_string(),
            full_name: "  ".to_string(),
            phone: None,
        };
        assert_eq!(profile.display_name(), "anon@example.com");
    }
}
