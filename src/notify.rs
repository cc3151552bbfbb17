//! Transient user-facing notification port.
//!
//! The session manager reports startup-recovery failures through this
//! seam instead of depending on a concrete UI toolkit. Hosts implement
//! it with whatever their platform uses for toasts or alerts.

use tracing::info;

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    /// Show a short, transient message to the user.
    fn notify(&self, message: &str);
}

/// Routes notifications into the log stream.
///
/// The default for headless hosts and tests; GUI hosts replace it with a
/// toast-backed implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("User notification: {}", message);
    }
}
