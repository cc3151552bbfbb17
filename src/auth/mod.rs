//! Session management: state, lifecycle operations, and errors.
//!
//! This module provides:
//! - `Session` / `SessionStatus`: the in-memory authenticated-user state
//! - `SessionManager`: the lifecycle operations over injected ports
//! - `AuthError`: the failure taxonomy those operations surface
//!
//! One manager instance lives for the whole process and is handed to
//! every surface that needs auth; nothing in here is global.

pub mod error;
pub mod manager;
pub mod session;

pub use error::AuthError;
pub use manager::{Route, SessionManager};
pub use session::{Session, SessionStatus};
