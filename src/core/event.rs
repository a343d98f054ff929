//! Log event structure

use super::level::Level;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged occurrence.
///
/// Constructed once per accepted `log()` call and never mutated afterwards;
/// the sink and every observer of that call see the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub priority: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub ident: String,
}

impl LogEvent {
    /// Sanitize the message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one event always renders as a single output line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(priority: Level, message: String, ident: String) -> Self {
        Self {
            priority,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            ident,
        }
    }

    /// Render the event as a single text line: `timestamp ident [level] message`.
    ///
    /// Shared by the text-emitting sinks; structured backends serialize the
    /// event themselves.
    pub fn format_line(&self, timestamp_format: &TimestampFormat) -> String {
        format!(
            "{} {} [{}] {}",
            timestamp_format.format(&self.timestamp),
            self.ident,
            self.priority.name(),
            self.message
        )
    }
}
