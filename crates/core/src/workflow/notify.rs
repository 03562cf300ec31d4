//! Operator feedback seam.
//!
//! The dialog reports outcomes through an injected `Notifier` rather than a
//! process-wide toast callback, so every dialog owns its feedback channel.

/// Receives success and failure messages meant for the operator.
pub trait Notifier: Send + Sync {
    /// A submission succeeded.
    fn success(&self, message: &str);

    /// A submission failed or was refused.
    fn error(&self, message: &str);
}
