//! Pool contract and the pool-level client

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use super::config::ClientConfig;
use super::connection::Connection;
use super::executor::RawExecutor;
use crate::dispatch::{Dispatcher, QueryOutcome, StatementRequest};
use crate::observability::{log_event, Event, MetricsRegistry, MetricsSnapshot};

/// Connection pool collaborator
///
/// The pool itself executes statements (checking a connection out per
/// statement) and can hand out a dedicated connection.
pub trait ConnectionPool: RawExecutor + Sized {
    type Connection: RawExecutor;

    /// Build the pool; options are passed through as given
    fn from_config(config: ClientConfig) -> Self;

    /// Check out a connection
    fn acquire(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Connection, Self::Error>> + Send + '_>>;
}

/// Entry point for the mapping layer
pub struct Client<P: ConnectionPool> {
    pool: P,
    metrics: Arc<MetricsRegistry>,
}

impl<P: ConnectionPool> Client<P> {
    /// Build the pool from `config`
    pub fn new(config: ClientConfig) -> Self {
        let host = config.host.clone().unwrap_or_default();
        let database = config.database.clone().unwrap_or_default();
        let pool = P::from_config(config);
        log_event(
            Event::PoolCreated,
            &[("database", database.as_str()), ("host", host.as_str())],
        );
        Self::from_pool(pool)
    }

    /// Wrap an already built pool
    pub fn from_pool(pool: P) -> Self {
        Self {
            pool,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Wire dialect served by this client
    pub fn dialect(&self) -> &'static str {
        "pg"
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Check out a dedicated connection sharing this client's counters
    pub async fn acquire(&self) -> Result<Connection<P::Connection>, P::Error> {
        let inner = self.pool.acquire().await?;
        log_event(Event::ConnectionAcquired, &[]);
        Ok(Connection::with_metrics(inner, Arc::clone(&self.metrics)))
    }

    /// Execute on any pooled connection
    pub async fn execute(
        &self,
        request: impl Into<StatementRequest>,
        values: Vec<Value>,
    ) -> Result<QueryOutcome, P::Error> {
        Dispatcher::new(&self.pool)
            .with_metrics(&self.metrics)
            .execute(request, values)
            .await
    }

    pub fn escape_identifier(&self, name: &str) -> String {
        self.pool.escape_identifier(name)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
