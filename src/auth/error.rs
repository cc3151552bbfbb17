//! Error type for session operations.

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by session lifecycle operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A refresh was attempted with nothing to exchange.
    #[error("No refresh token stored")]
    NoRefreshToken,

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The persistent store failed to read or write an entry.
    #[error("Storage error: {0}")]
    Storage(anyhow::Error),
}

impl AuthError {
    /// The server's detail message, when the underlying API error
    /// carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuthError::Api(e) => e.detail(),
            _ => None,
        }
    }

    /// True when the underlying failure was a 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthError::Api(e) if e.is_unauthorized())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(e: anyhow::Error) -> Self {
        AuthError::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_passes_through_api_errors() {
        let err = AuthError::from(ApiError::Unauthorized(Some(
            "Invalid refresh token".to_string(),
        )));
        assert_eq!(err.detail(), Some("Invalid refresh token"));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_storage_errors_have_no_detail() {
        let err = AuthError::from(anyhow::anyhow!("disk unavailable"));
        assert_eq!(err.detail(), None);
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "Storage error: disk unavailable");
    }

    #[test]
    fn test_no_refresh_token_display() {
        assert_eq!(
            AuthError::NoRefreshToken.to_string(),
            "No refresh token stored"
        );
    }
}
