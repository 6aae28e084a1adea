//! Hardware item handlers: list, create, batch create, read, details, update, delete, status.

use crate::error::AppError;
use crate::extractors::{JsonBody, PageRequest};
use crate::models::{BatchCreateBody, CreateHardwareBody, UpdateHardwareBody};
use crate::response::{created, created_message, success_many, success_one_ok};
use crate::schemas::{BATCH_BODY, CREATE_BODY, STATUS_PARAMS, UPDATE_BODY};
use crate::service::HardwareService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const NO_ITEMS: &str = "No hardware items found";
const NO_ITEM: &str = "No hardware item found";

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// Validate against a registered schema, then decode into the typed body.
fn decode<T: DeserializeOwned>(state: &AppState, schema: &str, body: Value) -> Result<T, AppError> {
    state.schemas.validate(schema, &body)?;
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

pub async fn list(
    State(state): State<AppState>,
    page: PageRequest,
) -> Result<impl IntoResponse, AppError> {
    let rows = HardwareService::list(&state.sessions, &page)
        .await
        .map_err(AppError::session("Failed to retrieve hardware items"))?;
    if rows.is_empty() {
        return Err(AppError::NotFound(NO_ITEMS));
    }
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body: CreateHardwareBody = decode(&state, CREATE_BODY, body)?;
    HardwareService::create(&state.sessions, &body)
        .await
        .map_err(AppError::session("Failed to add new hardware item"))?;
    tracing::info!(name = %body.name, label = %body.label, "hardware item created");
    Ok(created(body.name))
}

pub async fn create_many(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body: BatchCreateBody = decode(&state, BATCH_BODY, body)?;
    HardwareService::create_many(&state.sessions, &body)
        .await
        .map_err(AppError::session("Failed to add new hardware items"))?;
    tracing::info!(name = %body.name, quantity = body.quantity, "hardware items created");
    Ok(created_message("New hardware items added successfully"))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = HardwareService::read(&state.sessions, id)
        .await
        .map_err(AppError::session("Failed to retrieve hardware item"))?
        .ok_or(AppError::NotFound(NO_ITEM))?;
    Ok(success_one_ok(row))
}

pub async fn read_details(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let details = HardwareService::read_details(&state.sessions, id)
        .await
        .map_err(AppError::session("Failed to retrieve hardware item"))?
        .ok_or(AppError::NotFound(NO_ITEM))?;
    Ok(success_one_ok(details))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body: UpdateHardwareBody = decode(&state, UPDATE_BODY, body)?;
    HardwareService::update(&state.sessions, id, &body)
        .await
        .map_err(AppError::session("Failed to update hardware item"))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    HardwareService::delete(&state.sessions, id)
        .await
        .map_err(AppError::session("Failed to delete hardware item"))?;
    tracing::info!(id, "hardware item deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn change_status(
    State(state): State<AppState>,
    Path((id_str, status)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state
        .schemas
        .validate(STATUS_PARAMS, &serde_json::json!({ "status": status }))?;
    HardwareService::change_status(&state.sessions, id, &status)
        .await
        .map_err(AppError::session("Failed to change hardware item status"))?;
    Ok(StatusCode::NO_CONTENT)
}
