//! Core dispatch types and traits

pub mod config;
pub mod error;
pub mod event;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod observer;
pub mod sink;
pub mod timestamp;

pub use config::SinkConfig;
pub use error::{LogError, Result, SinkError};
pub use event::LogEvent;
pub use level::{Level, LevelMask};
pub use logger::{Logger, LoggerState};
pub use metrics::DispatchMetrics;
pub use observer::{NotifyError, Observer};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
