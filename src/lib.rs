//! # Logrelay
//!
//! A leveled logging facade: one front-facing interface through which
//! application code emits log events, decoupled from where the events go.
//!
//! ## Features
//!
//! - **Masked Dispatch**: an 8-level severity mask decides per logger which
//!   events reach its sink
//! - **Observer Fan-out**: independent listeners receive the same event
//!   stream, each at its own threshold
//! - **Sink Registry**: sink-type names resolve to constructors, with an
//!   optional memoizing path that shares one logger per construction
//!   signature
//! - **Synchronous**: a direct call-through with no buffering or delivery
//!   threads

pub mod core;
pub mod macros;
pub mod registry;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    #[cfg(feature = "network")]
    pub use crate::sinks::TcpSink;
    pub use crate::core::{
        DispatchMetrics, Level, LevelMask, LogError, LogEvent, Logger, LoggerState, NotifyError,
        Observer, Result, Sink, SinkConfig, SinkError, TimestampFormat,
    };
    pub use crate::registry::{registry, LogRegistry, SinkConstructor};
    pub use crate::sinks::{MemoryBuffer, MemorySink};
}

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
#[cfg(feature = "network")]
pub use crate::sinks::TcpSink;
pub use crate::core::{
    DispatchMetrics, Level, LevelMask, LogError, LogEvent, Logger, LoggerState, NotifyError,
    Observer, Result, Sink, SinkConfig, SinkError, TimestampFormat,
};
pub use crate::registry::{registry, LogRegistry, SinkConstructor};
pub use crate::sinks::{MemoryBuffer, MemorySink};
