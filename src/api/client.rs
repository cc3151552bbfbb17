//! HTTP client for the remote auth API.
//!
//! This module provides the `AuthClient` struct implementing the four
//! calls the session manager needs: login, register, refresh, and the
//! identity fetch.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::models::{RegisterRequest, TokenPair, User};

use super::{ApiError, AuthApi};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const REFRESH_PATH: &str = "/auth/refresh";
const ME_PATH: &str = "/auth/me";

/// API client for the auth endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new client against the given base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Exchange credentials for a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let response = self
            .client
            .post(self.endpoint(LOGIN_PATH))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Create a new account. The backend returns the identity record;
    /// no tokens are issued until a subsequent login.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.endpoint(REGISTER_PATH))
            .json(request)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let response = self
            .client
            .post(self.endpoint(REFRESH_PATH))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Fetch the identity record for the given access token.
    pub async fn me(&self, access_token: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .get(self.endpoint(ME_PATH))
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        AuthClient::login(self, email, password).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        AuthClient::register(self, request).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        AuthClient::refresh(self, refresh_token).await
    }

    async fn me(&self, access_token: &str) -> Result<User, ApiError> {
        AuthClient::me(self, access_token).await
    }
}

// Internal request bodies

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}
