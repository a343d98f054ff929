//! In-memory sink
//!
//! Captures events into a shared buffer instead of performing real I/O.
//! Intended for tests and for callers that want to inspect what would have
//! been written.

use crate::core::{LogEvent, Sink, SinkError};
use parking_lot::Mutex;
use std::sync::Arc;

/// Handle to the events captured by a [`MemorySink`].
///
/// Cloning is cheap and every clone sees the same buffer, so a test can keep
/// a handle after boxing the sink into a logger.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemoryBuffer {
    /// Snapshot of the captured events, oldest first.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

pub struct MemorySink {
    buffer: MemoryBuffer,
    opened: bool,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: MemoryBuffer::default(),
            opened: false,
        }
    }

    /// Capture into an existing buffer instead of a fresh one.
    #[must_use]
    pub fn with_buffer(buffer: MemoryBuffer) -> Self {
        Self {
            buffer,
            opened: false,
        }
    }

    /// Handle to the capture buffer.
    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn open(&mut self) -> Result<(), SinkError> {
        self.opened = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.opened = false;
        Ok(())
    }

    fn emit(&mut self, event: &LogEvent) -> Result<(), SinkError> {
        if !self.opened {
            return Err(SinkError::not_open(self.identity()));
        }
        self.buffer.events.lock().push(event.clone());
        Ok(())
    }

    fn identity(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;

    #[test]
    fn test_emit_requires_open() {
        let mut sink = MemorySink::new();
        let event = LogEvent::new(Level::Info, "hello".to_string(), "t".to_string());

        let err = sink.emit(&event).unwrap_err();
        assert!(matches!(err, SinkError::NotOpen(_)));

        sink.open().unwrap();
        sink.emit(&event).unwrap();
        assert_eq!(sink.buffer().len(), 1);
    }

    #[test]
    fn test_buffer_is_shared_across_clones() {
        let mut sink = MemorySink::new();
        let buffer = sink.buffer();

        sink.open().unwrap();
        sink.emit(&LogEvent::new(Level::Debug, "one".to_string(), "t".to_string()))
            .unwrap();

        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.events()[0].message, "one");

        buffer.clear();
        assert!(sink.buffer().is_empty());
    }

    #[test]
    fn test_close_is_safe_when_unopened() {
        let mut sink = MemorySink::new();
        sink.close().unwrap();
    }
}
