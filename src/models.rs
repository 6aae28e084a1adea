//! Request and response bodies of the hardware routes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A hardware record as returned by the read procedures. Columns the procedures add
/// beyond these are passed through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HardwareItem {
    pub id: i64,
    pub name: String,
    pub label: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub quantity: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateHardwareBody {
    pub name: String,
    pub label: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateHardwareBody {
    pub name: String,
    pub label: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Adds `quantity` units of one item in a single call.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BatchCreateBody {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub name: Option<String>,
    pub page_number: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub item_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
