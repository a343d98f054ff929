//! TCP sink
//!
//! Sends one line per event to a remote collector. `open()` establishes the
//! connection and `close()` shuts it down; there is no reconnect logic — a
//! broken connection surfaces as an emit failure for the caller to act on.

use crate::core::{LogEvent, Sink, SinkConfig, SinkError, TimestampFormat};
use std::io::Write;
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TcpSink {
    address: String,
    stream: Option<TcpStream>,
    timestamp_format: TimestampFormat,
}

impl TcpSink {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            stream: None,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build from a target address and a configuration bag.
    ///
    /// Recognized keys: `timestamp` (strftime format string).
    pub fn from_config(address: impl Into<String>, config: &SinkConfig) -> Self {
        let mut sink = Self::new(address);
        if let Some(format_str) = config.get("timestamp") {
            sink.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        }
        sink
    }
}

impl Sink for TcpSink {
    fn open(&mut self) -> Result<(), SinkError> {
        let stream = TcpStream::connect(&self.address)
            .map_err(|e| SinkError::io("connecting to", self.address.clone(), e))?;

        stream
            .set_write_timeout(Some(WRITE_TIMEOUT))
            .and_then(|_| stream.set_nodelay(true))
            .map_err(|e| SinkError::io("configuring socket for", self.address.clone(), e))?;

        self.stream = Some(stream);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if let Some(stream) = self.stream.take() {
            stream
                .shutdown(Shutdown::Both)
                .map_err(|e| SinkError::io("closing connection to", self.address.clone(), e))?;
        }
        Ok(())
    }

    fn emit(&mut self, event: &LogEvent) -> Result<(), SinkError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| SinkError::not_open("tcp"))?;

        let mut line = event.format_line(&self.timestamp_format);
        line.push('\n');

        match stream.write_all(line.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                // The connection is gone; drop it so the state is honest
                self.stream = None;
                Err(SinkError::io("sending to", self.address.clone(), e))
            }
        }
    }

    fn identity(&self) -> &str {
        "tcp"
    }
}
