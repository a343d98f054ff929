//! Error types for the logging facade

pub type Result<T, E = LogError> = std::result::Result<T, E>;

/// Failures raised by a concrete sink backend.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// IO error with context
    #[error("IO error while {operation} '{target}': {source}")]
    Io {
        operation: String,
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Emit attempted before the sink resource was established
    #[error("sink '{0}' is not open")]
    NotOpen(String),

    /// Backend-specific failure
    #[error("{0}")]
    Backend(String),
}

impl SinkError {
    /// Create an IO error with operation context
    pub fn io(
        operation: impl Into<String>,
        target: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        SinkError::Io {
            operation: operation.into(),
            target: target.into(),
            source,
        }
    }

    /// Create a not-open error for the named sink
    pub fn not_open(identity: impl Into<String>) -> Self {
        SinkError::NotOpen(identity.into())
    }

    /// Create a generic backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        SinkError::Backend(msg.into())
    }
}

/// Everything the dispatch core can return to a caller.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Numeric level outside the 0-7 domain
    #[error("invalid log level value: {0}")]
    InvalidLevel(u8),

    /// Level name that is not one of the eight canonical names
    #[error("unknown log level name: '{0}'")]
    UnknownLevelName(String),

    /// Operation attempted after the logger was closed
    #[error("logger is closed")]
    LoggerClosed,

    /// Sink failure encountered while dispatching
    #[error("sink failure: {0}")]
    Sink(#[from] SinkError),

    /// Observer cannot be keyed without an identity
    #[error("observer identity must not be empty")]
    ObserverIdentityEmpty,

    /// Detach of an identity that is not attached
    #[error("no observer attached with identity '{0}'")]
    NotAttached(String),

    /// Sink type with no registered constructor
    #[error("unknown sink type '{0}'")]
    UnknownSinkType(String),

    /// A registered constructor failed to build its sink
    #[error("failed to construct '{sink_type}' sink: {source}")]
    SinkConstruction {
        sink_type: String,
        #[source]
        source: SinkError,
    },

    /// JSON error (canonical registry key serialization)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LogError {
    /// Create a not-attached error for the given observer identity
    pub fn not_attached(identity: impl Into<String>) -> Self {
        LogError::NotAttached(identity.into())
    }

    /// Create an unknown-sink-type error
    pub fn unknown_sink_type(sink_type: impl Into<String>) -> Self {
        LogError::UnknownSinkType(sink_type.into())
    }

    /// Create a construction error wrapping the failing backend's error
    pub fn construction(sink_type: impl Into<String>, source: SinkError) -> Self {
        LogError::SinkConstruction {
            sink_type: sink_type.into(),
            source,
        }
    }
}
