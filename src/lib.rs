//! rowshape - result normalization for a Postgres wire client
//!
//! Sits between a raw executor (rows + column descriptors + row counts) and
//! an object-relational mapper:
//!
//! - [`cast`]: wire type code → best-effort value conversion
//! - [`binder`]: `?` placeholders → `$1`, `$2`, ...
//! - [`nest`]: flat join rows → `{ qualifier: { column: value } }`
//! - [`dispatch`]: statement-kind aware result shaping
//! - [`client`]: executor/pool contracts and the wrappers exposing `execute`
//! - [`observability`]: JSON logging and statement counters

pub mod binder;
pub mod cast;
pub mod client;
pub mod dispatch;
pub mod nest;
pub mod observability;

pub use client::{Client, ClientConfig, Connection, ConnectionPool, RawExecutor};
pub use dispatch::{MutationSummary, QueryOutcome, StatementKind, StatementRequest};
pub use nest::{NormalizedRow, QualifierPlan};
