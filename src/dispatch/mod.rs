//! Result Dispatcher
//!
//! Classifies a statement by its leading keyword, runs it through the raw
//! executor and shapes the reply into one of: nested rows, an insert summary,
//! a mutation summary, or the raw rows.

mod dispatcher;
mod outcome;
mod statement;

pub use dispatcher::Dispatcher;
pub use outcome::{MutationSummary, QueryOutcome};
pub use statement::{StatementKind, StatementRequest};
