//! Success envelope helpers.

use crate::models::{CreatedResponse, ListResponse, MessageResponse};
use axum::{http::StatusCode, Json};
use serde::Serialize;

/// 200 with `{ data, itemCount }`.
pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<ListResponse<T>>) {
    let item_count = data.len();
    (StatusCode::OK, Json(ListResponse { data, item_count }))
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 201 echoing the identifying field of the new record.
pub fn created(name: String) -> (StatusCode, Json<CreatedResponse>) {
    (StatusCode::CREATED, Json(CreatedResponse { name }))
}

pub fn created_message(message: &str) -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::CREATED,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}
