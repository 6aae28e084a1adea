//! SessionManager: acquire, execute one call, release; bounded by timeouts.

use crate::error::SessionError;
use crate::session::{ScopedSession, SessionSource};
use crate::sql::{Procedure, ProcedureCall, ResultShape};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub acquire: Duration,
    pub execute: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            acquire: Duration::from_millis(5_000),
            execute: Duration::from_millis(10_000),
        }
    }
}

#[derive(Clone)]
pub struct SessionManager {
    source: Arc<dyn SessionSource>,
    timeouts: Timeouts,
}

impl SessionManager {
    pub fn new(source: Arc<dyn SessionSource>, timeouts: Timeouts) -> Self {
        SessionManager { source, timeouts }
    }

    /// Lease a session. No retry: a failure here is fatal for the current request.
    pub async fn acquire(&self) -> Result<ScopedSession, SessionError> {
        match timeout(self.timeouts.acquire, self.source.acquire()).await {
            Ok(Ok(session)) => Ok(ScopedSession::new(session)),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(SessionError::ResourceUnavailable(format!(
                "timed out after {}ms waiting for a database session",
                self.timeouts.acquire.as_millis()
            ))),
        }
    }

    /// Run one stored procedure in its own scoped session and adapt the rows to the
    /// procedure's declared shape.
    pub async fn call<P, const N: usize>(
        &self,
        procedure: &P,
    ) -> Result<<P::Shape as ResultShape>::Output, SessionError>
    where
        P: Procedure<N>,
    {
        let call = ProcedureCall::of(procedure);
        let rows = self.run(&call).await?;
        Ok(<P::Shape as ResultShape>::adapt(rows))
    }

    async fn run(&self, call: &ProcedureCall) -> Result<Vec<serde_json::Value>, SessionError> {
        let mut session = self.acquire().await?;
        match timeout(self.timeouts.execute, session.call(call)).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::Backend(format!(
                "{} timed out after {}ms",
                call.name,
                self.timeouts.execute.as_millis()
            ))),
        }
    }

    pub async fn ping(&self) -> Result<(), SessionError> {
        let mut session = self.acquire().await?;
        match timeout(self.timeouts.execute, session.ping()).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::Backend("ping timed out".into())),
        }
    }

    pub async fn close(&self) {
        self.source.close().await;
    }
}
