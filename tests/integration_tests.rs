//! Integration tests for the dispatch facade
//!
//! These tests verify:
//! - Masked dispatch end to end
//! - Observer fan-out with independent thresholds
//! - Failure isolation between sink and observers
//! - Logger lifecycle
//! - Registry memoization

use logrelay::prelude::*;
use parking_lot::Mutex;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Observer that records every event it is notified of.
struct RecordingObserver {
    identity: String,
    threshold: Level,
    seen: Mutex<Vec<LogEvent>>,
}

impl RecordingObserver {
    fn new(identity: &str, threshold: Level) -> Arc<Self> {
        Arc::new(Self {
            identity: identity.to_string(),
            threshold,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen_messages(&self) -> Vec<String> {
        self.seen.lock().iter().map(|e| e.message.clone()).collect()
    }
}

impl Observer for RecordingObserver {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn threshold(&self) -> Level {
        self.threshold
    }

    fn notify(&self, event: &LogEvent) -> Result<(), NotifyError> {
        self.seen.lock().push(event.clone());
        Ok(())
    }
}

/// Sink whose emit always fails after opening successfully.
struct FailingSink {
    emit_attempts: AtomicUsize,
}

impl FailingSink {
    fn new() -> Self {
        Self {
            emit_attempts: AtomicUsize::new(0),
        }
    }
}

impl Sink for FailingSink {
    fn open(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn emit(&mut self, _event: &LogEvent) -> Result<(), SinkError> {
        self.emit_attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::backend("simulated write failure"))
    }

    fn identity(&self) -> &str {
        "failing"
    }
}

fn memory_logger(ident: &str) -> (Logger, MemoryBuffer) {
    let sink = MemorySink::new();
    let buffer = sink.buffer();
    (Logger::new(Box::new(sink)).with_ident(ident), buffer)
}

#[test]
fn test_mask_filters_sink_traffic() {
    let (logger, buffer) = memory_logger("app");
    logger.set_mask(LevelMask::up_to(Level::Error));

    logger.info("not for the sink").unwrap();
    logger.debug("also dropped").unwrap();
    logger.critical("this one counts").unwrap();

    let events = buffer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].priority, Level::Critical);
    assert_eq!(events[0].message, "this one counts");
    assert_eq!(events[0].ident, "app");

    assert_eq!(logger.metrics().filtered(), 2);
    assert_eq!(logger.metrics().accepted(), 1);
}

#[test]
fn test_exact_level_mask() {
    let (logger, buffer) = memory_logger("app");
    logger.set_mask(LevelMask::only(Level::Notice));

    logger.emergency("dropped despite severity").unwrap();
    logger.notice("accepted").unwrap();
    logger.debug("dropped").unwrap();

    let events = buffer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].priority, Level::Notice);
}

#[test]
fn test_observers_apply_their_own_thresholds() {
    let (logger, _buffer) = memory_logger("app");

    let picky = RecordingObserver::new("picky", Level::Warning);
    let greedy = RecordingObserver::new("greedy", Level::Debug);
    logger.attach(picky.clone()).unwrap();
    logger.attach(greedy.clone()).unwrap();

    // notice is less severe than warning, so only the debug-threshold
    // observer hears about it
    logger.notice("a notice event").unwrap();

    assert!(picky.seen_messages().is_empty());
    assert_eq!(greedy.seen_messages(), vec!["a notice event".to_string()]);

    // an alert passes both thresholds
    logger.alert("an alert event").unwrap();
    assert_eq!(picky.seen_messages(), vec!["an alert event".to_string()]);
    assert_eq!(greedy.seen_messages().len(), 2);
}

#[test]
fn test_observers_only_hear_mask_accepted_events() {
    let (logger, buffer) = memory_logger("app");
    logger.set_mask(LevelMask::up_to(Level::Error));

    let all_ears = RecordingObserver::new("all-ears", Level::Debug);
    logger.attach(all_ears.clone()).unwrap();

    logger.info("masked out").unwrap();

    assert!(buffer.is_empty());
    assert!(all_ears.seen_messages().is_empty());
}

#[test]
fn test_reattach_replaces_prior_observer() {
    let (logger, _buffer) = memory_logger("app");

    let first = RecordingObserver::new("watcher", Level::Debug);
    let second = RecordingObserver::new("watcher", Level::Debug);
    logger.attach(first.clone()).unwrap();
    logger.attach(second.clone()).unwrap();
    assert_eq!(logger.observer_count(), 1);

    logger.warning("one event").unwrap();

    // Only the replacement hears it, exactly once
    assert!(first.seen_messages().is_empty());
    assert_eq!(second.seen_messages().len(), 1);
}

#[test]
fn test_detach_stops_delivery() {
    let (logger, _buffer) = memory_logger("app");

    let observer = RecordingObserver::new("watcher", Level::Debug);
    logger.attach(observer.clone()).unwrap();
    logger.info("heard").unwrap();

    logger.detach("watcher").unwrap();
    logger.info("not heard").unwrap();

    assert_eq!(observer.seen_messages(), vec!["heard".to_string()]);
    assert!(matches!(
        logger.detach("watcher"),
        Err(LogError::NotAttached(_))
    ));
}

#[test]
fn test_sink_failure_reaches_caller_but_not_observers() {
    let logger = Logger::new(Box::new(FailingSink::new())).with_ident("app");
    let observer = RecordingObserver::new("watcher", Level::Debug);
    logger.attach(observer.clone()).unwrap();

    let err = logger.error("write this").unwrap_err();
    assert!(matches!(err, LogError::Sink(_)));

    // The observer was still announced the event the sink failed to emit
    assert_eq!(observer.seen_messages(), vec!["write this".to_string()]);
    assert_eq!(logger.metrics().sink_failures(), 1);
}

#[test]
fn test_failing_observer_does_not_stop_fanout() {
    struct ExplodingObserver;
    impl Observer for ExplodingObserver {
        fn identity(&self) -> &str {
            "exploding"
        }
        fn threshold(&self) -> Level {
            Level::Debug
        }
        fn notify(&self, _event: &LogEvent) -> Result<(), NotifyError> {
            panic!("observer bug")
        }
    }

    struct RefusingObserver;
    impl Observer for RefusingObserver {
        fn identity(&self) -> &str {
            "refusing"
        }
        fn threshold(&self) -> Level {
            Level::Debug
        }
        fn notify(&self, _event: &LogEvent) -> Result<(), NotifyError> {
            Err(NotifyError::new("not today"))
        }
    }

    let (logger, buffer) = memory_logger("app");
    let witness = RecordingObserver::new("witness", Level::Debug);
    logger.attach(Arc::new(ExplodingObserver)).unwrap();
    logger.attach(Arc::new(RefusingObserver)).unwrap();
    logger.attach(witness.clone()).unwrap();

    // The call itself succeeds: sink emission worked
    logger.info("still delivered").unwrap();

    assert_eq!(buffer.len(), 1);
    assert_eq!(witness.seen_messages(), vec!["still delivered".to_string()]);
    assert_eq!(logger.metrics().notify_failures(), 2);
}

#[test]
fn test_log_after_close_performs_no_io_and_no_fanout() {
    let (logger, buffer) = memory_logger("app");
    let observer = RecordingObserver::new("watcher", Level::Debug);
    logger.attach(observer.clone()).unwrap();

    logger.info("before").unwrap();
    logger.close().unwrap();

    let err = logger.info("after").unwrap_err();
    assert!(matches!(err, LogError::LoggerClosed));

    assert_eq!(buffer.len(), 1);
    assert_eq!(observer.seen_messages(), vec!["before".to_string()]);
}

#[test]
fn test_file_logging_end_to_end() {
    let temp_dir = TempDir::new().expect("temp dir");
    let log_path = temp_dir.path().join("app.log");

    let logger = Logger::new(Box::new(FileSink::new(&log_path))).with_ident("worker");
    logger.set_mask(LevelMask::up_to(Level::Warning));

    logger.warning("low disk space").unwrap();
    logger.info("ignored by mask").unwrap();
    logger.emergency("power failing").unwrap();
    logger.close().unwrap();

    let content = fs::read_to_string(&log_path).expect("read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("worker [warning] low disk space"));
    assert!(lines[1].contains("worker [emergency] power failing"));
}

#[test]
fn test_log_injection_stays_on_one_line() {
    let temp_dir = TempDir::new().expect("temp dir");
    let log_path = temp_dir.path().join("injection.log");

    let logger = Logger::new(Box::new(FileSink::new(&log_path))).with_ident("web");
    logger
        .info("login\nemergency web [emergency] forged entry")
        .unwrap();
    logger.close().unwrap();

    let content = fs::read_to_string(&log_path).expect("read log file");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("\\n"));
}

#[test]
fn test_registry_memoization_shares_instances() {
    let registry = LogRegistry::with_default_sinks();
    let config = SinkConfig::new();

    let a = registry
        .get_or_create("memory", "", "app", &config, Level::Debug)
        .unwrap();
    let b = registry
        .get_or_create("memory", "", "app", &config, Level::Debug)
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    // The non-memoizing path never shares
    let c = registry
        .create("memory", "", "app", &config, Level::Debug)
        .unwrap();
    let d = registry
        .create("memory", "", "app", &config, Level::Debug)
        .unwrap();
    c.set_ident("mutated");
    assert_eq!(d.ident(), "app");
}

#[test]
fn test_registry_created_logger_dispatches() {
    let registry = LogRegistry::with_default_sinks();

    let logger = registry
        .get_or_create("memory", "", "svc", &SinkConfig::new(), Level::Warning)
        .unwrap();

    logger.notice("too quiet for the mask").unwrap();
    logger.alert("loud enough").unwrap();

    assert_eq!(logger.metrics().accepted(), 1);
    assert_eq!(logger.metrics().filtered(), 1);
}

#[test]
fn test_process_wide_registry_is_shared() {
    let config = SinkConfig::new().with("tag", "process-wide-test");

    let a = registry()
        .get_or_create("memory", "", "global", &config, Level::Debug)
        .unwrap();
    let b = registry()
        .get_or_create("memory", "", "global", &config, Level::Debug)
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_concurrent_dispatch_through_shared_logger() {
    let registry = LogRegistry::with_default_sinks();
    let logger = registry
        .get_or_create("memory", "", "shared", &SinkConfig::new(), Level::Debug)
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format!("worker {} message {}", worker, i)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread");
    }

    assert_eq!(logger.metrics().accepted(), 100);
}
