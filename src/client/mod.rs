//! Raw executor contract and composition wrappers
//!
//! - [`RawExecutor`]: the wire client this crate sits on
//! - [`ConnectionPool`]: builds executors from a [`ClientConfig`]
//! - [`Connection`] / [`Client`]: hold an executor and expose shaped results

mod config;
mod connection;
mod executor;
mod identifier;
mod pool;
mod scripted;

pub use config::ClientConfig;
pub use connection::Connection;
pub use executor::{
    ColumnDescriptor, ExecuteFuture, RawExecutor, RawResult, Row, RowMode, NO_TABLE,
};
pub use identifier::escape_identifier;
pub use pool::{Client, ConnectionPool};
pub use scripted::{RecordedCall, ScriptedError, ScriptedExecutor, ScriptedPool};
