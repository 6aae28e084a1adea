//! Hardware operations: one stored-procedure call per operation, each in its own session.

use crate::error::SessionError;
use crate::extractors::PageRequest;
use crate::models::{BatchCreateBody, CreateHardwareBody, UpdateHardwareBody};
use crate::service::procedures::*;
use crate::session::SessionManager;
use serde_json::Value;

pub struct HardwareService;

impl HardwareService {
    /// One page of items matching the optional name filter. Empty is not an error here.
    pub async fn list(sessions: &SessionManager, page: &PageRequest) -> Result<Vec<Value>, SessionError> {
        sessions
            .call(&ListHardwareItems {
                name: page.name.as_deref(),
                skip: page.skip(),
                limit: page.limit,
            })
            .await
    }

    pub async fn create(sessions: &SessionManager, body: &CreateHardwareBody) -> Result<(), SessionError> {
        sessions
            .call(&CreateHardwareItem {
                name: &body.name,
                label: &body.label,
                category: &body.category,
                description: body.description.as_deref(),
            })
            .await
    }

    pub async fn create_many(sessions: &SessionManager, body: &BatchCreateBody) -> Result<(), SessionError> {
        sessions
            .call(&CreateManyHardwareItems {
                name: &body.name,
                category: &body.category,
                description: body.description.as_deref(),
                link: body.link.as_deref(),
                quantity: body.quantity,
            })
            .await
    }

    pub async fn read(sessions: &SessionManager, id: i64) -> Result<Option<Value>, SessionError> {
        sessions.call(&ReadHardwareItem { id }).await
    }

    /// Item plus details, assembled by the backend into one JSON document.
    pub async fn read_details(sessions: &SessionManager, id: i64) -> Result<Option<Value>, SessionError> {
        sessions.call(&ReadCombinedHardwareDetails { id }).await
    }

    pub async fn update(
        sessions: &SessionManager,
        id: i64,
        body: &UpdateHardwareBody,
    ) -> Result<(), SessionError> {
        sessions
            .call(&UpdateHardwareItem {
                id,
                name: &body.name,
                label: &body.label,
                category: &body.category,
                description: body.description.as_deref(),
            })
            .await
    }

    pub async fn delete(sessions: &SessionManager, id: i64) -> Result<(), SessionError> {
        sessions.call(&DeleteHardwareItem { id }).await
    }

    pub async fn change_status(sessions: &SessionManager, id: i64, status: &str) -> Result<(), SessionError> {
        sessions.call(&ChangeHardwareItemStatus { id, status }).await
    }

    pub async fn list_categories(sessions: &SessionManager) -> Result<Vec<Value>, SessionError> {
        sessions.call(&ListCategories).await
    }
}
