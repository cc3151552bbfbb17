//! Core session library for the Reelcast mobile client.
//!
//! Screens stay thin: this crate owns the authenticated-user lifecycle
//! (credential exchange, token persistence, refresh, sign-out) against
//! the Reelcast API, behind injectable ports for transport, storage,
//! and user notification.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use reelcast_core::{
//!     api::AuthClient, auth::SessionManager, config::Config, notify::LogNotifier,
//!     storage::FileStore, Route,
//! };
//!
//! # async fn start() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let api = Arc::new(AuthClient::new(config.api_base_url())?);
//! let store = Arc::new(FileStore::new(config.data_dir()?));
//! let manager = SessionManager::new(api, store, Arc::new(LogNotifier));
//!
//! match manager.initialize().await {
//!     Route::Home => { /* show the feed */ }
//!     Route::Login => { /* show the login surface */ }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod notify;
pub mod storage;

pub use api::{ApiError, AuthApi, AuthClient};
pub use auth::{AuthError, Route, Session, SessionManager, SessionStatus};
pub use config::Config;
pub use models::{RegisterRequest, TokenPair, User};
pub use notify::{LogNotifier, Notifier};
pub use storage::{FileStore, KeychainStore, MemoryStore, SessionStore};
