//! Scoped database sessions: lease one session per call, release it on scope exit.
//!
//! A [`SessionSource`] hands out boxed [`Session`]s; the [`SessionManager`] wraps each
//! lease in a [`ScopedSession`] whose `Drop` is the only release path. Dropping happens
//! exactly once whether the call succeeds, fails, times out, or the request future is
//! cancelled.

mod manager;
pub mod mysql;

#[cfg(test)]
pub(crate) mod mock;

pub use manager::{SessionManager, Timeouts};
pub use mysql::MySqlSessionSource;

use crate::error::SessionError;
use crate::sql::{out_param_rows, BindValue, ProcedureCall, ShapeKind};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;

/// A leased backend session. Release is dropping it.
#[async_trait]
pub trait Session: Send {
    /// Run a statement and collect the rows of its first result set as JSON objects.
    async fn fetch(&mut self, sql: &str, params: &[BindValue]) -> Result<Vec<Value>, SessionError>;

    /// Run a statement for its side effect; returns rows affected.
    async fn execute(&mut self, sql: &str, params: &[BindValue]) -> Result<u64, SessionError>;
}

/// Pool of sessions shared by all requests.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn Session>, SessionError>;

    /// Close the pool; outstanding leases are closed as they are released.
    async fn close(&self);
}

/// A session bound to the scope that acquired it. Not `Clone`; no manual release.
pub struct ScopedSession {
    inner: Box<dyn Session>,
    acquired_at: Instant,
}

impl ScopedSession {
    pub(crate) fn new(inner: Box<dyn Session>) -> Self {
        ScopedSession {
            inner,
            acquired_at: Instant::now(),
        }
    }

    /// Issue the bound call and return raw rows. OUT parameters are read back on the
    /// same session.
    pub async fn call(&mut self, call: &ProcedureCall) -> Result<Vec<Value>, SessionError> {
        let sql = call.statement();
        tracing::debug!(sql = %sql, params = ?call.params, "call");
        match (call.kind, call.out_select()) {
            (ShapeKind::NoRows, _) => {
                self.inner.execute(&sql, &call.params).await?;
                Ok(Vec::new())
            }
            (_, Some(select)) => {
                self.inner.execute(&sql, &call.params).await?;
                tracing::debug!(sql = %select, "query");
                let rows = self.inner.fetch(&select, &[]).await?;
                Ok(out_param_rows(rows, call.out_param.unwrap_or_default()))
            }
            (_, None) => self.inner.fetch(&sql, &call.params).await,
        }
    }

    /// Round trip with no procedure involved; used by readiness checks.
    pub async fn ping(&mut self) -> Result<(), SessionError> {
        self.inner.fetch("SELECT 1", &[]).await.map(|_| ())
    }
}

impl Drop for ScopedSession {
    fn drop(&mut self) {
        tracing::debug!(held = ?self.acquired_at.elapsed(), "session released");
    }
}
