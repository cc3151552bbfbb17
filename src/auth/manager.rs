//! Session lifecycle operations.
//!
//! `SessionManager` owns the in-memory [`Session`] and drives the five
//! operations of the authenticated-user lifecycle:
//!
//! - `initialize` - startup recovery from persisted credentials
//! - `login` / `signup` - credential exchange and identity fetch
//! - `refresh_token` - single-flight token pair rotation
//! - `logout` - best-effort teardown
//!
//! The manager talks to the world only through its injected ports
//! ([`AuthApi`], [`SessionStore`], [`Notifier`]), so the whole lifecycle
//! runs unchanged against the real backend or against test fakes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::models::{RegisterRequest, User};
use crate::notify::Notifier;
use crate::storage::{keys, SessionStore};

use super::error::AuthError;
use super::session::{Session, SessionStatus};

// ============================================================================
// User-facing messages
// ============================================================================

/// Shown when the app starts with no persisted session.
const MSG_LOGIN_REQUIRED: &str = "Please login to continue.";

/// Shown when startup recovery cannot renew the persisted session and
/// the server supplied no detail message.
const MSG_SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Shown when startup validation fails for a reason other than an
/// expired token.
const MSG_AUTH_ERROR: &str = "Authentication error. Please login again.";

/// Which surface the host should present after an operation.
///
/// The manager never touches a router; callers map these to whatever
/// navigation scheme they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The authenticated home surface.
    Home,
    /// The login surface.
    Login,
}

/// Owner of the process-wide session.
///
/// Hosts construct one instance at startup and share it (`Arc`) with
/// every surface that needs auth. Mutating operations are serialized
/// through an internal lock, so concurrent calls from different tasks
/// cannot interleave their storage writes.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    session: RwLock<Session>,
    /// Serializes the five lifecycle operations.
    op_lock: Mutex<()>,
    /// Bumped on every persisted-credential change. A refresh caller
    /// that waited on the operation lock uses it to detect that the
    /// pair it meant to exchange is already gone.
    token_epoch: AtomicU64,
}

impl SessionManager {
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            session: RwLock::new(Session::new()),
            op_lock: Mutex::new(()),
            token_epoch: AtomicU64::new(0),
        }
    }

    // ===== Read accessors =====

    pub async fn status(&self) -> SessionStatus {
        self.session.read().await.status()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn is_initializing(&self) -> bool {
        self.session.read().await.is_initializing()
    }

    /// The signed-in identity, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.current_user().cloned()
    }

    /// The validated access token, for callers making authenticated
    /// requests of their own.
    pub async fn access_token(&self) -> Option<String> {
        self.session.read().await.access_token().map(str::to_string)
    }

    /// A point-in-time copy of the full session state.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    // ===== Lifecycle operations =====

    /// Recover the session from persisted credentials at startup.
    ///
    /// With no stored token this resolves locally. A stored token is
    /// validated against the identity endpoint; a 401 gets exactly one
    /// refresh-and-retry before the session is torn down. Every exit
    /// path leaves `is_initializing` false and returns the `Route` the
    /// host should present.
    pub async fn initialize(&self) -> Route {
        let _op = self.op_lock.lock().await;
        let route = self.initialize_locked().await;
        self.session.write().await.finish_initializing();
        route
    }

    /// Exchange credentials for a token pair and load the identity.
    ///
    /// Persists both tokens, then fetches and persists the identity
    /// record before the in-memory session flips to authenticated.
    /// `Ok(())` means the caller should route home. On failure the
    /// in-memory session is left unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let _op = self.op_lock.lock().await;
        self.login_locked(email, password).await
    }

    /// Create an account, then sign straight into it.
    ///
    /// Registration failure propagates before any login attempt is
    /// made.
    pub async fn signup(
        &self,
        username: &str,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let _op = self.op_lock.lock().await;

        let request = RegisterRequest {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let registered = self.api.register(&request).await?;
        info!(user_id = registered.id, "Account registered");

        self.login_locked(email, password).await
    }

    /// Rotate the token pair using the persisted refresh token.
    ///
    /// Single-flight: callers that pile up behind an in-progress
    /// refresh get the already-renewed token back instead of spending a
    /// second exchange. With no persisted refresh token this fails fast
    /// without touching the network. Returns the new access token.
    pub async fn refresh_token(&self) -> Result<String, AuthError> {
        let seen = self.token_epoch.load(Ordering::SeqCst);
        let _op = self.op_lock.lock().await;

        // Another caller may have rotated the pair while we waited on
        // the lock. If so, the token it installed is the one we want.
        if self.token_epoch.load(Ordering::SeqCst) != seen {
            if let Some(token) = self.store.get(keys::ACCESS_TOKEN).await? {
                debug!("Refresh already performed by a concurrent caller");
                return Ok(token);
            }
        }

        self.refresh_locked().await
    }

    /// Tear down the session.
    ///
    /// Clears the persisted entries and resets the in-memory state.
    /// Storage failures are logged, never surfaced; from the caller's
    /// perspective logout always succeeds.
    pub async fn logout(&self) -> Route {
        let _op = self.op_lock.lock().await;
        self.clear_locked().await;
        info!("Signed out");
        Route::Login
    }

    // ===== Internals (operation lock held) =====

    async fn initialize_locked(&self) -> Route {
        let stored = match self.store.get(keys::ACCESS_TOKEN).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted access token");
                self.notifier.notify(MSG_AUTH_ERROR);
                self.clear_locked().await;
                return Route::Login;
            }
        };

        let Some(token) = stored else {
            debug!("No persisted access token, routing to login");
            self.notifier.notify(MSG_LOGIN_REQUIRED);
            return Route::Login;
        };

        match self.api.me(&token).await {
            Ok(user) => {
                info!(user_id = user.id, "Session restored");
                self.session.write().await.set_authenticated(user, token);
                Route::Home
            }
            Err(e) if e.is_unauthorized() => {
                debug!("Persisted access token rejected, attempting refresh");
                self.recover_expired_session().await
            }
            Err(e) => {
                warn!(error = %e, "Identity fetch failed during startup");
                self.notifier.notify(MSG_AUTH_ERROR);
                self.clear_locked().await;
                Route::Login
            }
        }
    }

    /// One refresh, one retried identity fetch. Any failure here is
    /// terminal for startup recovery.
    async fn recover_expired_session(&self) -> Route {
        let recovered: Result<(), AuthError> = async {
            let access_token = self.exchange_refresh_token().await?;
            let user = self.api.me(&access_token).await?;
            self.persist_user(&user).await?;
            info!(user_id = user.id, "Session restored after refresh");
            self.session.write().await.set_authenticated(user, access_token);
            Ok(())
        }
        .await;

        match recovered {
            Ok(()) => Route::Home,
            Err(e) => {
                warn!(error = %e, "Session recovery failed");
                let message = e
                    .detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| MSG_SESSION_EXPIRED.to_string());
                self.notifier.notify(&message);
                self.clear_locked().await;
                Route::Login
            }
        }
    }

    async fn login_locked(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let pair = self.api.login(email, password).await?;
        self.store.set(keys::ACCESS_TOKEN, &pair.access_token).await?;
        self.store.set(keys::REFRESH_TOKEN, &pair.refresh_token).await?;
        self.token_epoch.fetch_add(1, Ordering::SeqCst);

        let user = self.api.me(&pair.access_token).await?;
        self.persist_user(&user).await?;
        info!(user_id = user.id, "Login successful");

        self.session.write().await.set_authenticated(user, pair.access_token);
        Ok(())
    }

    async fn refresh_locked(&self) -> Result<String, AuthError> {
        let access_token = self.exchange_refresh_token().await?;

        // Keep the cached identity coherent with the rotated pair.
        if self.store.get(keys::USER).await?.is_some() {
            let user = self.api.me(&access_token).await?;
            self.persist_user(&user).await?;
            let mut session = self.session.write().await;
            if session.is_authenticated() {
                session.update_user(user);
            }
        }

        Ok(access_token)
    }

    /// Swap the persisted refresh token for a new pair. Does not touch
    /// the cached identity; callers decide how to revalidate it.
    async fn exchange_refresh_token(&self) -> Result<String, AuthError> {
        let refresh_token = self
            .store
            .get(keys::REFRESH_TOKEN)
            .await?
            .ok_or(AuthError::NoRefreshToken)?;

        let pair = self.api.refresh(&refresh_token).await?;
        self.store.set(keys::ACCESS_TOKEN, &pair.access_token).await?;
        self.store.set(keys::REFRESH_TOKEN, &pair.refresh_token).await?;
        self.token_epoch.fetch_add(1, Ordering::SeqCst);
        debug!("Token pair rotated");

        let mut session = self.session.write().await;
        if session.is_authenticated() {
            session.update_access_token(pair.access_token.clone());
        }

        Ok(pair.access_token)
    }

    async fn persist_user(&self, user: &User) -> Result<(), AuthError> {
        let json = serde_json::to_string(user).map_err(|e| AuthError::Storage(e.into()))?;
        self.store.set(keys::USER, &json).await?;
        Ok(())
    }

    /// Clear persisted entries and reset the in-memory session. Storage
    /// failures are logged, never surfaced.
    async fn clear_locked(&self) {
        for key in [keys::ACCESS_TOKEN, keys::REFRESH_TOKEN, keys::USER] {
            if let Err(e) = self.store.remove(key).await {
                warn!(key, error = %e, "Failed to clear persisted session entry");
            }
        }
        self.token_epoch.fetch_add(1, Ordering::SeqCst);
        self.session.write().await.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
