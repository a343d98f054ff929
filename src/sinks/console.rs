//! Console sink
//!
//! Prints one line per event, routing error-severity events and worse to
//! stderr and the rest to stdout.

use crate::core::{Level, LogEvent, Sink, SinkConfig, SinkError, TimestampFormat};
use colored::Colorize;
use std::io::Write;

pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build from a configuration bag.
    ///
    /// Recognized keys: `colors` (boolean, default true) and `timestamp`
    /// (strftime format string).
    pub fn from_config(config: &SinkConfig) -> Self {
        let mut sink = Self::new();
        if let Some(colors) = config.get_bool("colors") {
            sink.use_colors = colors;
        }
        if let Some(format_str) = config.get("timestamp") {
            sink.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        }
        sink
    }

    fn format_text(&self, event: &LogEvent) -> String {
        let level_str = if self.use_colors {
            event
                .priority
                .name()
                .color(event.priority.color_code())
                .to_string()
        } else {
            event.priority.name().to_string()
        };

        format!(
            "{} {} [{}] {}",
            self.timestamp_format.format(&event.timestamp),
            event.ident,
            level_str,
            event.message
        )
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn open(&mut self) -> Result<(), SinkError> {
        // The terminal is always there; nothing to establish.
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        std::io::stdout()
            .flush()
            .and_then(|_| std::io::stderr().flush())
            .map_err(|e| SinkError::io("flushing", self.identity().to_string(), e))
    }

    fn emit(&mut self, event: &LogEvent) -> Result<(), SinkError> {
        let line = self.format_text(event);

        // Error severity and worse goes to stderr, the rest to stdout
        let written = if event.priority.at_least_as_severe_as(Level::Error) {
            writeln!(std::io::stderr().lock(), "{}", line)
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)
        };

        written.map_err(|e| SinkError::io("writing to", self.identity().to_string(), e))
    }

    fn identity(&self) -> &str {
        "console"
    }
}
