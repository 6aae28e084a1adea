//! In-memory session source for tests: scripted replies, acquire/release counters.

use crate::error::SessionError;
use crate::session::{Session, SessionSource};
use crate::sql::BindValue;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub(crate) enum MockReply {
    Rows(Vec<Value>),
    Fail(SessionError),
    Hang,
}

#[derive(Default)]
struct MockState {
    acquired: usize,
    released: usize,
    calls: Vec<(String, Vec<BindValue>)>,
    replies: VecDeque<MockReply>,
    acquire_error: Option<String>,
    hang_acquire: bool,
    closed: bool,
}

#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the reply for the next statement. Unscripted statements return no rows.
    pub fn reply(&self, reply: MockReply) {
        self.state.lock().unwrap().replies.push_back(reply);
    }

    pub fn fail_acquire(&self, message: &str) {
        self.state.lock().unwrap().acquire_error = Some(message.to_string());
    }

    pub fn hang_acquire(&self) {
        self.state.lock().unwrap().hang_acquire = true;
    }

    pub fn acquired(&self) -> usize {
        self.state.lock().unwrap().acquired
    }

    pub fn released(&self) -> usize {
        self.state.lock().unwrap().released
    }

    pub fn closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }

    pub fn calls(&self) -> Vec<(String, Vec<BindValue>)> {
        self.state.lock().unwrap().calls.clone()
    }

    fn next(&self, sql: &str, params: &[BindValue]) -> Option<Result<Vec<Value>, SessionError>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((sql.to_string(), params.to_vec()));
        match state.replies.pop_front() {
            Some(MockReply::Rows(rows)) => Some(Ok(rows)),
            Some(MockReply::Fail(e)) => Some(Err(e)),
            Some(MockReply::Hang) => None,
            None => Some(Ok(Vec::new())),
        }
    }
}

struct MockSession {
    backend: MockBackend,
}

#[async_trait]
impl Session for MockSession {
    async fn fetch(&mut self, sql: &str, params: &[BindValue]) -> Result<Vec<Value>, SessionError> {
        match self.backend.next(sql, params) {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    async fn execute(&mut self, sql: &str, params: &[BindValue]) -> Result<u64, SessionError> {
        match self.backend.next(sql, params) {
            Some(result) => result.map(|rows| rows.len() as u64),
            None => std::future::pending().await,
        }
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.backend.state.lock().unwrap().released += 1;
    }
}

#[async_trait]
impl SessionSource for MockBackend {
    async fn acquire(&self) -> Result<Box<dyn Session>, SessionError> {
        let (error, hang) = {
            let state = self.state.lock().unwrap();
            (state.acquire_error.clone(), state.hang_acquire)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        if let Some(message) = error {
            return Err(SessionError::ResourceUnavailable(message));
        }
        self.state.lock().unwrap().acquired += 1;
        Ok(Box::new(MockSession {
            backend: self.clone(),
        }))
    }

    async fn close(&self) {
        self.state.lock().unwrap().closed = true;
    }
}
