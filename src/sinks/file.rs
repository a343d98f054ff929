//! File sink
//!
//! Appends one line per event to a log file. The file handle is established
//! by `open()` and released by `close()`; each emit is a single write.

use crate::core::{LogEvent, Sink, SinkConfig, SinkError, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileSink {
    path: PathBuf,
    append: bool,
    file: Option<File>,
    timestamp_format: TimestampFormat,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append: true,
            file: None,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Truncate instead of appending when the file is opened.
    #[must_use]
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build from a target path and a configuration bag.
    ///
    /// Recognized keys: `append` (boolean, default true) and `timestamp`
    /// (strftime format string).
    pub fn from_config(path: impl Into<PathBuf>, config: &SinkConfig) -> Self {
        let mut sink = Self::new(path);
        if let Some(append) = config.get_bool("append") {
            sink.append = append;
        }
        if let Some(format_str) = config.get("timestamp") {
            sink.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        }
        sink
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn open(&mut self) -> Result<(), SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(self.append)
            .write(true)
            .truncate(!self.append)
            .open(&self.path)
            .map_err(|e| SinkError::io("opening", self.path.display().to_string(), e))?;
        self.file = Some(file);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .map_err(|e| SinkError::io("flushing", self.path.display().to_string(), e))?;
        }
        Ok(())
    }

    fn emit(&mut self, event: &LogEvent) -> Result<(), SinkError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| SinkError::not_open("file"))?;

        let mut line = event.format_line(&self.timestamp_format);
        line.push('\n');

        file.write_all(line.as_bytes())
            .map_err(|e| SinkError::io("appending to", self.path.display().to_string(), e))
    }

    fn identity(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Release the handle even when the owner forgot to close
        let _ = self.close();
    }
}
