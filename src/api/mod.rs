//! REST API client module for the remote auth service.
//!
//! This module provides the `AuthApi` port consumed by the session
//! manager and its production implementation, `AuthClient`.
//!
//! The API uses JWT bearer token authentication: login and refresh
//! return an access/refresh pair, and the identity endpoint expects
//! the access token in the Authorization header.

pub mod client;
pub mod error;

pub use client::AuthClient;
pub use error::ApiError;

use async_trait::async_trait;

use crate::models::{RegisterRequest, TokenPair, User};

/// The four remote calls the session manager depends on.
///
/// Object safe so hosts and tests can inject their own transport; the
/// manager only ever holds an `Arc<dyn AuthApi>`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair.
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError>;

    /// Create a new account, returning its identity record.
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError>;

    /// Exchange a refresh token for a fresh token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;

    /// Fetch the identity record for the given access token.
    async fn me(&self, access_token: &str) -> Result<User, ApiError>;
}
