//! The dispatching logger
//!
//! Holds the active level mask, the identity stamped on outgoing events, the
//! attached observers, and the bound sink. Dispatch is a direct synchronous
//! call-through: mask check, sink emission, observer announcement, all within
//! the caller's `log()` invocation.

use super::{
    error::{LogError, Result},
    event::LogEvent,
    level::{Level, LevelMask},
    metrics::DispatchMetrics,
    observer::Observer,
    sink::Sink,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Lifecycle of a logger. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Unopened,
    Opened,
    Closed,
}

pub struct Logger {
    state: RwLock<LoggerState>,
    ident: RwLock<String>,
    mask: RwLock<LevelMask>,
    observers: RwLock<HashMap<String, Arc<dyn Observer>>>,
    sink: Mutex<Box<dyn Sink>>,
    metrics: DispatchMetrics,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("state", &*self.state.read())
            .field("ident", &*self.ident.read())
            .field("mask", &*self.mask.read())
            .field("observers", &self.observers.read().keys().collect::<Vec<_>>())
            .field("sink", &"<dyn Sink>")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Logger {
    /// Create an unopened logger bound to the given sink, with an empty
    /// identity and a mask accepting every level.
    #[must_use]
    pub fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            state: RwLock::new(LoggerState::Unopened),
            ident: RwLock::new(String::new()),
            mask: RwLock::new(LevelMask::ALL),
            observers: RwLock::new(HashMap::new()),
            sink: Mutex::new(sink),
            metrics: DispatchMetrics::new(),
        }
    }

    /// Set the identity stamped on outgoing events
    #[must_use = "builder methods return a new value"]
    pub fn with_ident(self, ident: impl Into<String>) -> Self {
        *self.ident.write() = ident.into();
        self
    }

    /// Set the initial level mask
    #[must_use = "builder methods return a new value"]
    pub fn with_mask(self, mask: LevelMask) -> Self {
        *self.mask.write() = mask;
        self
    }

    pub fn state(&self) -> LoggerState {
        *self.state.read()
    }

    /// Establish the sink's underlying resource.
    ///
    /// Idempotent while the logger is open; fails with `LoggerClosed` once
    /// the logger has been closed. `log()` calls this lazily, so eager
    /// opening is only needed to surface resource errors early.
    pub fn open(&self) -> Result<()> {
        let mut state = self.state.write();
        match *state {
            LoggerState::Closed => Err(LogError::LoggerClosed),
            LoggerState::Opened => Ok(()),
            LoggerState::Unopened => {
                self.sink.lock().open()?;
                *state = LoggerState::Opened;
                Ok(())
            }
        }
    }

    /// Close the logger and release the sink's resource.
    ///
    /// The transition to `Closed` happens unconditionally; a sink close
    /// failure is surfaced to the caller but the logger stays closed.
    pub fn close(&self) -> Result<()> {
        {
            let mut state = self.state.write();
            if *state == LoggerState::Closed {
                return Ok(());
            }
            *state = LoggerState::Closed;
        }
        self.sink.lock().close().map_err(LogError::from)
    }

    /// Dispatch one message at the given level.
    ///
    /// A message filtered out by the active mask is a successful no-op. An
    /// accepted message is stamped into an event, handed to the sink, and
    /// announced to every attached observer whose threshold accepts it; the
    /// announcement runs regardless of the emit outcome, and the emit outcome
    /// is what the caller gets back. Sink failures are never retried.
    pub fn log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        if *self.state.read() == LoggerState::Closed {
            return Err(LogError::LoggerClosed);
        }

        if !self.mask.read().contains(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        if *self.state.read() == LoggerState::Unopened {
            self.open()?;
        }

        let event = LogEvent::new(level, message.into(), self.ident.read().clone());
        self.metrics.record_accepted();

        let emitted = self.sink.lock().emit(&event);
        if emitted.is_err() {
            self.metrics.record_sink_failure();
        }

        self.announce(&event);

        emitted.map_err(LogError::from)
    }

    #[inline]
    pub fn emergency(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Emergency, message)
    }

    #[inline]
    pub fn alert(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Alert, message)
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Critical, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Error, message)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Warning, message)
    }

    #[inline]
    pub fn notice(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Notice, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Info, message)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Debug, message)
    }

    /// Replace the active mask, returning the mask now in force.
    pub fn set_mask(&self, mask: LevelMask) -> LevelMask {
        *self.mask.write() = mask;
        mask
    }

    pub fn mask(&self) -> LevelMask {
        *self.mask.read()
    }

    pub fn set_ident(&self, ident: impl Into<String>) {
        *self.ident.write() = ident.into();
    }

    pub fn ident(&self) -> String {
        self.ident.read().clone()
    }

    /// Attach an observer, keyed by its identity. A later attach with the
    /// same identity replaces the earlier observer.
    pub fn attach(&self, observer: Arc<dyn Observer>) -> Result<()> {
        let identity = observer.identity().to_string();
        if identity.is_empty() {
            return Err(LogError::ObserverIdentityEmpty);
        }
        self.observers.write().insert(identity, observer);
        Ok(())
    }

    /// Detach the observer attached under the given identity.
    pub fn detach(&self, identity: &str) -> Result<()> {
        match self.observers.write().remove(identity) {
            Some(_) => Ok(()),
            None => Err(LogError::not_attached(identity)),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Announce an event to every attached observer whose threshold accepts
    /// its priority. Each notification is isolated: an error or a panic from
    /// one observer is reported on stderr and counted, and never prevents
    /// delivery to the remaining observers.
    fn announce(&self, event: &LogEvent) {
        let listeners: Vec<Arc<dyn Observer>> = self.observers.read().values().cloned().collect();

        for observer in listeners {
            if !event.priority.at_least_as_severe_as(observer.threshold()) {
                continue;
            }

            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                observer.notify(event)
            }));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGRELAY ERROR] observer '{}' failed: {}",
                        observer.identity(),
                        e
                    );
                    self.metrics.record_notify_failure();
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGRELAY CRITICAL] observer '{}' panicked: {}. \
                         Remaining observers continue to be notified.",
                        observer.identity(),
                        panic_message(panic_info.as_ref())
                    );
                    self.metrics.record_notify_failure();
                }
            }
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
