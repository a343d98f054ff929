//! Sink registry and logger factory
//!
//! Resolves sink-type names to constructor functions and builds loggers from
//! the five-part construction signature (type, name, ident, config, max
//! level). The memoizing path keys a process-wide instance table by the
//! canonical serialization of that signature, so identical requests share
//! one logger.
//!
//! Constructor resolution is a plain table populated by explicit
//! `register` calls; there is no runtime code loading.

use crate::core::{Level, LevelMask, LogError, Logger, Result, Sink, SinkConfig, SinkError};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Constructor for one sink type.
///
/// `name` is the backend-specific target (path, address, table); its
/// semantics belong to the sink, as do the configuration keys.
pub type SinkConstructor =
    fn(name: &str, config: &SinkConfig) -> std::result::Result<Box<dyn Sink>, SinkError>;

/// Canonical instance key: the full construction signature, serialized.
#[derive(Serialize)]
struct InstanceKey<'a> {
    sink_type: &'a str,
    name: &'a str,
    ident: &'a str,
    config: &'a SinkConfig,
    max_level: Level,
}

pub struct LogRegistry {
    constructors: RwLock<HashMap<String, SinkConstructor>>,
    instances: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LogRegistry {
    /// Create an empty registry with no sink types registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry with the built-in sink types registered.
    #[must_use]
    pub fn with_default_sinks() -> Self {
        let registry = Self::new();
        #[cfg(feature = "console")]
        registry.register("console", construct_console);
        #[cfg(feature = "file")]
        registry.register("file", construct_file);
        registry.register("memory", construct_memory);
        #[cfg(feature = "network")]
        registry.register("tcp", construct_tcp);
        registry
    }

    /// Register a constructor under a sink-type name, replacing any previous
    /// registration for that name.
    pub fn register(&self, sink_type: impl Into<String>, constructor: SinkConstructor) {
        self.constructors.write().insert(sink_type.into(), constructor);
    }

    pub fn is_registered(&self, sink_type: &str) -> bool {
        self.constructors.read().contains_key(sink_type)
    }

    /// Build a fresh, unopened logger for the given construction signature.
    ///
    /// The logger starts with ident `ident` and a mask accepting `max_level`
    /// and everything more severe.
    pub fn create(
        &self,
        sink_type: &str,
        name: &str,
        ident: &str,
        config: &SinkConfig,
        max_level: Level,
    ) -> Result<Logger> {
        let constructor = {
            let constructors = self.constructors.read();
            *constructors
                .get(sink_type)
                .ok_or_else(|| LogError::unknown_sink_type(sink_type))?
        };

        let sink = constructor(name, config).map_err(|e| LogError::construction(sink_type, e))?;

        Ok(Logger::new(sink)
            .with_ident(ident)
            .with_mask(LevelMask::up_to(max_level)))
    }

    /// Return the shared logger for this construction signature, building it
    /// on first request.
    ///
    /// Instances are shared, not cloned: mask or ident mutations through one
    /// holder are visible to every other holder of the same signature. The
    /// table has no eviction; it lives as long as the registry.
    pub fn get_or_create(
        &self,
        sink_type: &str,
        name: &str,
        ident: &str,
        config: &SinkConfig,
        max_level: Level,
    ) -> Result<Arc<Logger>> {
        let key = serde_json::to_string(&InstanceKey {
            sink_type,
            name,
            ident,
            config,
            max_level,
        })?;

        let mut instances = self.instances.lock();
        if let Some(existing) = instances.get(&key) {
            return Ok(Arc::clone(existing));
        }

        let logger = Arc::new(self.create(sink_type, name, ident, config, max_level)?);
        instances.insert(key, Arc::clone(&logger));
        Ok(logger)
    }

    /// Number of memoized instances currently held.
    pub fn instance_count(&self) -> usize {
        self.instances.lock().len()
    }

    /// Drop every memoized instance. Intended for test isolation; subsequent
    /// `get_or_create` calls build fresh loggers.
    pub fn clear_instances(&self) {
        self.instances.lock().clear();
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry, initialized with the built-in sink types on
/// first use.
pub fn registry() -> &'static LogRegistry {
    static REGISTRY: OnceLock<LogRegistry> = OnceLock::new();
    REGISTRY.get_or_init(LogRegistry::with_default_sinks)
}

#[cfg(feature = "console")]
fn construct_console(
    _name: &str,
    config: &SinkConfig,
) -> std::result::Result<Box<dyn Sink>, SinkError> {
    Ok(Box::new(crate::sinks::ConsoleSink::from_config(config)))
}

#[cfg(feature = "file")]
fn construct_file(
    name: &str,
    config: &SinkConfig,
) -> std::result::Result<Box<dyn Sink>, SinkError> {
    if name.is_empty() {
        return Err(SinkError::backend("file sink requires a target path"));
    }
    Ok(Box::new(crate::sinks::FileSink::from_config(name, config)))
}

fn construct_memory(
    _name: &str,
    _config: &SinkConfig,
) -> std::result::Result<Box<dyn Sink>, SinkError> {
    Ok(Box::new(crate::sinks::MemorySink::new()))
}

#[cfg(feature = "network")]
fn construct_tcp(
    name: &str,
    config: &SinkConfig,
) -> std::result::Result<Box<dyn Sink>, SinkError> {
    if name.is_empty() {
        return Err(SinkError::backend("tcp sink requires a target address"));
    }
    Ok(Box::new(crate::sinks::TcpSink::from_config(name, config)))
}
