//! Shared application state for all routes.

use crate::schemas::SchemaRegistry;
use crate::session::SessionManager;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Sessions are leased per request; nothing here holds a connection.
    pub sessions: SessionManager,
    pub schemas: Arc<SchemaRegistry>,
}
