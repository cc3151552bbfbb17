//! Credential pair returned by the auth endpoints.

use serde::{Deserialize, Serialize};

/// Access/refresh token pair as served by the login and refresh endpoints.
///
/// Both tokens are opaque bearer strings with server-defined expiry. The
/// access token is attached to authenticated requests; the refresh token is
/// used only to mint a new pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always "bearer" from the current backend.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}
