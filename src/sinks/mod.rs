//! Sink implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;
#[cfg(feature = "network")]
pub mod tcp;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::{MemoryBuffer, MemorySink};
#[cfg(feature = "network")]
pub use tcp::TcpSink;

// Re-export the trait alongside its implementations
pub use crate::core::Sink;
