//! In-memory session state.

use chrono::{DateTime, Utc};

use crate::models::User;

/// Where the session currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Startup recovery has not finished yet.
    Initializing,
    /// A validated identity is present.
    Authenticated,
    /// No identity; the login surface should be shown.
    Unauthenticated,
}

/// Process-wide session state, mutated only through `SessionManager`
/// operations.
///
/// Invariant: `current_user` is present iff `access_token` is present and
/// was validated, either by an identity fetch or optimistically by a
/// successful refresh.
#[derive(Debug, Clone)]
pub struct Session {
    current_user: Option<User>,
    access_token: Option<String>,
    is_initializing: bool,
    authenticated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh session in the "initializing, unauthenticated" state.
    pub fn new() -> Self {
        Self {
            current_user: None,
            access_token: None,
            is_initializing: true,
            authenticated_at: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_initializing {
            SessionStatus::Initializing
        } else if self.current_user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_initializing(&self) -> bool {
        self.is_initializing
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The bearer token for authenticated requests, if validated.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// When the current credentials were last validated or refreshed.
    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    /// Install a validated identity and its access token.
    pub(crate) fn set_authenticated(&mut self, user: User, access_token: String) {
        self.current_user = Some(user);
        self.access_token = Some(access_token);
        self.authenticated_at = Some(Utc::now());
        self.is_initializing = false;
    }

    /// Swap in a refreshed access token. Only meaningful while an
    /// identity is present; the pairing invariant is the caller's job.
    pub(crate) fn update_access_token(&mut self, access_token: String) {
        self.access_token = Some(access_token);
        self.authenticated_at = Some(Utc::now());
    }

    /// Replace the identity with a fresher server copy.
    pub(crate) fn update_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    /// Reset to unauthenticated, ending any startup recovery.
    pub(crate) fn clear(&mut self) {
        self.current_user = None;
        self.access_token = None;
        self.authenticated_at = None;
        self.is_initializing = false;
    }

    pub(crate) fn finish_initializing(&mut self) {
        self.is_initializing = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            username: None,
            full_name: None,
            avatar_url: None,
            is_active: true,
            is_verified: true,
            provider: "email".to_string(),
            created_at: "2025-03-14T09:26:53".to_string(),
            last_login: None,
        }
    }

    #[test]
    fn test_new_session_is_initializing() {
        let session = Session::new();
        assert_eq!(session.status(), SessionStatus::Initializing);
        assert!(session.is_initializing());
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(session.access_token().is_none());
        assert!(session.authenticated_at().is_none());
    }

    #[test]
    fn test_finish_initializing_resolves_to_unauthenticated() {
        let mut session = Session::new();
        session.finish_initializing();
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_set_authenticated_pairs_user_and_token() {
        let mut session = Session::new();
        session.set_authenticated(sample_user(), "T1".to_string());

        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert!(!session.is_initializing());
        assert_eq!(session.access_token(), Some("T1"));
        assert_eq!(session.current_user().unwrap().email, "a@b.com");
        assert!(session.authenticated_at().is_some());
    }

    #[test]
    fn test_update_access_token_keeps_identity() {
        let mut session = Session::new();
        session.set_authenticated(sample_user(), "T1".to_string());
        session.update_access_token("T2".to_string());

        assert_eq!(session.access_token(), Some("T2"));
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap().id, 1);
    }

    #[test]
    fn test_clear_resets_to_unauthenticated() {
        let mut session = Session::new();
        session.set_authenticated(sample_user(), "T1".to_string());
        session.clear();

        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert!(session.current_user().is_none());
        assert!(session.access_token().is_none());
        assert!(session.authenticated_at().is_none());
    }
}
