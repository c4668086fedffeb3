//! Observability for statement shaping
//!
//! - Structured JSON logging with a severity threshold
//! - Typed lifecycle events
//! - Lock-free statement counters
//!
//! Observability never fails a statement: write errors are dropped.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_LEVEL_ENV};

#[cfg(test)]
pub(crate) use logger::capture;
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
