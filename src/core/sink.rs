//! Sink trait for log output backends
//!
//! Sinks are the only components that perform I/O; the dispatch core never
//! touches a file descriptor, socket, or terminal directly.

use super::error::SinkError;
use super::event::LogEvent;

pub trait Sink: Send + Sync {
    /// Establish the underlying resource (file handle, socket, terminal).
    ///
    /// Calling `open` on an already-open sink is backend-defined unless the
    /// implementation documents otherwise.
    fn open(&mut self) -> Result<(), SinkError>;

    /// Release the resource. Must be a no-op on a sink that was never opened.
    fn close(&mut self) -> Result<(), SinkError>;

    /// Deliver one event. Partial or failed writes must be reported, never
    /// swallowed.
    fn emit(&mut self, event: &LogEvent) -> Result<(), SinkError>;

    fn identity(&self) -> &str;
}
