//! Named request schemas, registered once at startup and shared through state.

use crate::error::{AppError, ConfigError};
use crate::models::{
    BatchCreateBody, CreateHardwareBody, CreatedResponse, HardwareItem, ListQuery, MessageResponse,
    UpdateHardwareBody,
};
use crate::service::{RequestValidator, ValidationRule};
use serde_json::{json, Value};
use std::collections::HashMap;
use utoipa::OpenApi;

pub const CREATE_BODY: &str = "create-body";
pub const UPDATE_BODY: &str = "update-body";
pub const BATCH_BODY: &str = "batch-body";
pub const STATUS_PARAMS: &str = "status-params";

#[derive(OpenApi)]
#[openapi(components(schemas(
    HardwareItem,
    CreateHardwareBody,
    UpdateHardwareBody,
    BatchCreateBody,
    ListQuery,
    CreatedResponse,
    MessageResponse
)))]
struct ApiDoc;

/// OpenAPI components describing every body the hardware routes accept or return.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    by_id: HashMap<&'static str, HashMap<String, ValidationRule>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        SchemaRegistry::default()
    }

    pub fn add(&mut self, id: &'static str, rules: Value) -> Result<(), ConfigError> {
        let rules: HashMap<String, ValidationRule> =
            serde_json::from_value(rules).map_err(|e| ConfigError::Schema {
                id,
                reason: e.to_string(),
            })?;
        self.by_id.insert(id, rules);
        Ok(())
    }

    /// Validate `body` against the schema registered under `id`. An unregistered id is a
    /// server fault, not a client one.
    pub fn validate(&self, id: &str, body: &Value) -> Result<(), AppError> {
        let rules = self
            .by_id
            .get(id)
            .ok_or_else(|| AppError::Internal(format!("unknown schema: {}", id)))?;
        RequestValidator::validate(body, rules)
    }

    /// Schemas for the hardware routes.
    pub fn hardware() -> Result<Self, ConfigError> {
        let item_fields = json!({
            "name": { "required": true, "kind": "string", "min_length": 1, "max_length": 255 },
            "label": { "required": true, "kind": "string", "min_length": 1, "max_length": 255 },
            "category": { "required": true, "kind": "string", "min_length": 1, "max_length": 255 },
            "description": { "kind": "string", "max_length": 1000 }
        });
        let mut registry = SchemaRegistry::new();
        registry.add(CREATE_BODY, item_fields.clone())?;
        registry.add(UPDATE_BODY, item_fields)?;
        registry.add(
            BATCH_BODY,
            json!({
                "name": { "required": true, "kind": "string", "min_length": 1, "max_length": 255 },
                "category": { "required": true, "kind": "string", "min_length": 1, "max_length": 255 },
                "description": { "kind": "string", "max_length": 1000 },
                "link": { "kind": "string", "max_length": 2048 },
                "quantity": { "required": true, "kind": "integer", "minimum": 1, "maximum": 1000 }
            }),
        )?;
        registry.add(
            STATUS_PARAMS,
            json!({
                "status": { "required": true, "kind": "string", "min_length": 1, "max_length": 32, "pattern": "^[A-Za-z_-]+$" }
            }),
        )?;
        Ok(registry)
    }
}
