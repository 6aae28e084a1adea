//! Category listing.

use crate::error::AppError;
use crate::response::success_many;
use crate::service::HardwareService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = HardwareService::list_categories(&state.sessions)
        .await
        .map_err(AppError::session("Failed to retrieve categories"))?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No categories found"));
    }
    Ok(success_many(rows))
}
