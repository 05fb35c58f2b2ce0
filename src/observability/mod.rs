//! Observability for the store
//!
//! Per OBSERVABILITY.md:
//! - Structured JSON logging, one line per event
//! - Typed lifecycle events
//! - Exact, counter-only metrics
//!
//! Observability is read-only: it never influences a protocol decision
//! and its failure never fails an operation.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Level, Logger};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Logs a lifecycle event with no fields.
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Logs a lifecycle event with fields.
///
/// Fatal events are logged FATAL; everything else INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let level = if event.is_fatal() {
        Level::Fatal
    } else {
        Level::Info
    };
    Logger::log(level, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_does_not_panic() {
        log_event(Event::TxnBegin);
        log_event(Event::VersionRecommit);
    }

    #[test]
    fn test_log_event_with_fields_does_not_panic() {
        log_event_with_fields(Event::TxnCommit, &[("txn", "1"), ("commit_ts", "9")]);
    }
}
