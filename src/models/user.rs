//! Identity record for the authenticated account.
//!
//! These types mirror the backend's user schema field for field,
//! so responses deserialize without renames.

use serde::{Deserialize, Serialize};

/// The authenticated account as served by the backend.
///
/// Immutable once fetched; replaced wholesale by a fresher copy from
/// the server rather than patched in place. Timestamps are kept as the
/// ISO-8601 strings the server emits (no fixed offset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    /// Auth provider tag, e.g. "email" or "google".
    pub provider: String,
    pub created_at: String,
    pub last_login: Option<String>,
}

impl User {
    /// Best available name for display: full name, then username,
    /// then the local part of the email address.
    pub fn display_name(&self) -> String {
        if let Some(ref name) = self.full_name {
            if !name.is_empty() {
                return name.clone();
            }
        }
        if let Some(ref username) = self.username {
            if !username.is_empty() {
                return username.clone();
            }
        }
        self.email
            .split('@')
            .next()
            .unwrap_or(&self.email)
            .to_string()
    }
}

/// Request body for account creation.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user_json() -> &'static str {
        r#"{
            "id": 7,
            "email": "creator@example.com",
            "username": "creator",
            "full_name": "Casey Creator",
            "avatar_url": null,
            "is_active": true,
            "is_verified": false,
            "provider": "email",
            "created_at": "2025-03-14T09:26:53",
            "last_login": null
        }"#
    }

    #[test]
    fn test_parse_user_response() {
        let user: User = serde_json::from_str(sample_user_json())
            .expect("Failed to parse user test JSON");
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "creator@example.com");
        assert_eq!(user.username.as_deref(), Some("creator"));
        assert_eq!(user.full_name.as_deref(), Some("Casey Creator"));
        assert!(user.avatar_url.is_none());
        assert!(user.is_active);
        assert!(!user.is_verified);
        assert_eq!(user.provider, "email");
        assert_eq!(user.created_at, "2025-03-14T09:26:53");
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_parse_user_with_missing_optionals() {
        // Older backend builds omit nullable fields entirely
        let json = r#"{
            "id": 1,
            "email": "a@b.com",
            "is_active": true,
            "is_verified": true,
            "provider": "google",
            "created_at": "2024-11-02T18:00:11"
        }"#;
        let user: User = serde_json::from_str(json)
            .expect("Failed to parse minimal user JSON");
        assert!(user.username.is_none());
        assert!(user.full_name.is_none());
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let user: User = serde_json::from_str(sample_user_json()).unwrap();
        assert_eq!(user.display_name(), "Casey Creator");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user: User = serde_json::from_str(sample_user_json()).unwrap();
        user.full_name = None;
        assert_eq!(user.display_name(), "creator");

        user.full_name = Some(String::new());
        assert_eq!(user.display_name(), "creator");
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        let mut user: User = serde_json::from_str(sample_user_json()).unwrap();
        user.full_name = None;
        user.username = None;
        assert_eq!(user.display_name(), "creator");

        user.email = "plain".to_string();
        assert_eq!(user.display_name(), "plain");
    }

    #[test]
    fn test_register_request_serializes_snake_case() {
        let req = RegisterRequest {
            username: "creator".to_string(),
            full_name: "Casey Creator".to_string(),
            email: "creator@example.com".to_string(),
            password: "pw".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["username"], "creator");
        assert_eq!(value["full_name"], "Casey Creator");
        assert_eq!(value["email"], "creator@example.com");
        assert_eq!(value["password"], "pw");
    }
}
