//! Observer trait for event listeners
//!
//! Observers attach to a logger and are announced every event the logger's
//! own mask accepts; each observer then applies its own threshold. A failing
//! observer never affects the sink or the remaining observers.

use super::event::LogEvent;
use super::level::Level;

/// What `notify` returns on failure.
///
/// Swallowed at the announcement boundary: reported on stderr and counted in
/// the logger's metrics, never propagated to the `log()` caller.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct NotifyError(String);

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        NotifyError(message.into())
    }
}

pub trait Observer: Send + Sync {
    /// Unique key under which the observer is attached. Attaching another
    /// observer with the same identity replaces this one.
    fn identity(&self) -> &str;

    /// Least severe level this observer wants to hear about. An event is
    /// delivered iff its priority is at least as severe as the threshold.
    fn threshold(&self) -> Level;

    fn notify(&self, event: &LogEvent) -> Result<(), NotifyError>;
}
