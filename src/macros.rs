//! Logging macros for ergonomic message formatting.
//!
//! Each macro applies `format!` to its arguments and forwards to the
//! corresponding logger method, evaluating to that call's `Result`.
//!
//! # Examples
//!
//! ```
//! use logrelay::prelude::*;
//! use logrelay::{info, warning};
//!
//! let logger = Logger::new(Box::new(MemorySink::new()));
//!
//! info!(logger, "server started").unwrap();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port).unwrap();
//! warning!(logger, "disk {}% full", 92).unwrap();
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use logrelay::prelude::*;
/// # let logger = Logger::new(Box::new(MemorySink::new()));
/// use logrelay::log;
/// log!(logger, Level::Notice, "simple message").unwrap();
/// log!(logger, Level::Error, "exit code: {}", 3).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Emergency, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Alert, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Notice, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}
