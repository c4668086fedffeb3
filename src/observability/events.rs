//! Observable events emitted while shaping statement results

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Pool built from a client configuration
    PoolCreated,
    /// Connection checked out of the pool
    ConnectionAcquired,
    /// Placeholders rewritten; carries the interpolated statement
    StatementPrepared,
    /// Statement completed and its result was shaped
    StatementExecuted,
    /// Raw executor returned an error
    StatementFailed,
    /// A column value could not be converted by its cast rule (debug only)
    CastFailed,
    /// INSERT ... RETURNING yielded no primary-key value
    GeneratedKeyMissing,
    /// More column runs than qualifier plan entries
    QualifierPlanExhausted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::PoolCreated => "POOL_CREATED",
            Event::ConnectionAcquired => "CONNECTION_ACQUIRED",
            Event::StatementPrepared => "STATEMENT_PREPARED",
            Event::StatementExecuted => "STATEMENT_EXECUTED",
            Event::StatementFailed => "STATEMENT_FAILED",
            Event::CastFailed => "CAST_FAILED",
            Event::GeneratedKeyMissing => "GENERATED_KEY_MISSING",
            Event::QualifierPlanExhausted => "QUALIFIER_PLAN_EXHAUSTED",
        }
    }

    /// Default severity for the event
    pub fn severity(&self) -> super::Severity {
        use super::Severity;
        match self {
            Event::StatementPrepared | Event::CastFailed => Severity::Trace,
            Event::PoolCreated | Event::ConnectionAcquired | Event::StatementExecuted => {
                Severity::Info
            }
            Event::GeneratedKeyMissing | Event::QualifierPlanExhausted => Severity::Warn,
            Event::StatementFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
