//! Scripted executor and pool
//!
//! Replays queued responses in order and records every statement it
//! receives. Used by tests and by callers exercising a mapping layer without
//! a server.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use super::config::ClientConfig;
use super::executor::{ExecuteFuture, RawExecutor, RawResult, RowMode};
use super::pool::ConnectionPool;
use crate::binder::BoundStatement;

/// Error replayed by a [`ScriptedExecutor`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScriptedError {
    pub message: String,
}

impl ScriptedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A statement as received by the executor
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub statement: BoundStatement,
    pub mode: RowMode,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Executor answering from a queue of canned responses
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<RawResult, ScriptedError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_result(&self, result: RawResult) {
        lock(&self.responses).push_back(Ok(result));
    }

    /// Queue a protocol failure
    pub fn push_error(&self, error: ScriptedError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Statements received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }
}

impl RawExecutor for ScriptedExecutor {
    type Error = ScriptedError;

    fn execute_statement<'a>(
        &'a self,
        statement: &'a BoundStatement,
        mode: RowMode,
    ) -> ExecuteFuture<'a, Self::Error> {
        lock(&self.calls).push(RecordedCall {
            statement: statement.clone(),
            mode,
        });
        let response = lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(ScriptedError::new("no scripted response queued")));
        Box::pin(async move { response })
    }
}

/// Pool handing out one shared [`ScriptedExecutor`]
#[derive(Debug)]
pub struct ScriptedPool {
    config: ClientConfig,
    executor: Arc<ScriptedExecutor>,
    acquired: AtomicU64,
    refuse: AtomicBool,
}

impl ScriptedPool {
    /// Config the pool was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Executor shared by the pool and every acquired connection
    pub fn executor(&self) -> &Arc<ScriptedExecutor> {
        &self.executor
    }

    /// Connections handed out so far
    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::Relaxed)
    }

    /// Make subsequent `acquire` calls fail
    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::Relaxed);
    }
}

impl RawExecutor for ScriptedPool {
    type Error = ScriptedError;

    fn execute_statement<'a>(
        &'a self,
        statement: &'a BoundStatement,
        mode: RowMode,
    ) -> ExecuteFuture<'a, Self::Error> {
        self.executor.execute_statement(statement, mode)
    }
}

impl ConnectionPool for ScriptedPool {
    type Connection = Arc<ScriptedExecutor>;

    fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            executor: Arc::new(ScriptedExecutor::new()),
            acquired: AtomicU64::new(0),
            refuse: AtomicBool::new(false),
        }
    }

    fn acquire(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Connection, Self::Error>> + Send + '_>> {
        Box::pin(async move {
            if self.refuse.load(Ordering::Relaxed) {
                return Err(ScriptedError::new("connection refused"));
            }
            self.acquired.fetch_add(1, Ordering::Relaxed);
            Ok(Arc::clone(&self.executor))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::prepare;

    #[tokio::test]
    async fn test_replays_in_order() {
        let executor = ScriptedExecutor::new();
        executor.push_result(RawResult {
            row_count: 1,
            ..RawResult::default()
        });
        executor.push_error(ScriptedError::new("boom"));

        let statement = prepare("SELECT 1", Vec::new());
        let first = executor.execute_statement(&statement, RowMode::Keyed).await;
        let second = executor.execute_statement(&statement, RowMode::Array).await;
        let third = executor.execute_statement(&statement, RowMode::Keyed).await;

        assert_eq!(first.unwrap().row_count, 1);
        assert_eq!(second.unwrap_err().message, "boom");
        assert!(third.is_err());
        assert_eq!(executor.calls().len(), 3);
        assert_eq!(executor.calls()[1].mode, RowMode::Array);
    }

    #[tokio::test]
    async fn test_pool_refuses_when_told() {
        let pool = ScriptedPool::from_config(ClientConfig::default());
        assert!(pool.acquire().await.is_ok());
        pool.refuse_connections(true);
        assert!(pool.acquire().await.is_err());
        assert_eq!(pool.acquired(), 1);
    }
}
