use super::*;
use crate::error::SessionError;
use crate::schemas::SchemaRegistry;
use crate::session::mock::{MockBackend, MockReply};
use crate::session::{SessionManager, Timeouts};
use crate::sql::BindValue;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(backend: &MockBackend) -> Router {
    let state = AppState {
        sessions: SessionManager::new(Arc::new(backend.clone()), Timeouts::default()),
        schemas: Arc::new(SchemaRegistry::hardware().unwrap()),
    };
    build_router(state, 64 * 1024)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn cable() -> Value {
    json!({ "name": "Cable", "label": "CA-001", "category": "Accessory", "description": "USB-C" })
}

#[tokio::test]
async fn list_returns_rows_and_count() {
    let backend = MockBackend::new();
    let rows: Vec<Value> = (1..=3).map(|i| json!({ "id": i, "name": "Cable" })).collect();
    backend.reply(MockReply::Rows(rows.clone()));

    let (status, body) = send(app(&backend), "GET", "/hardware_inventory?name=Cable&pageNumber=3&limit=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemCount"], 3);
    assert_eq!(body["data"], Value::Array(rows));
    assert_eq!(
        backend.calls(),
        vec![(
            "CALL `list_hardware_items`(?, ?, ?)".to_string(),
            vec![BindValue::String("Cable".into()), BindValue::I64(20), BindValue::I64(10)]
        )]
    );
    assert_eq!((backend.acquired(), backend.released()), (1, 1));
}

#[tokio::test]
async fn empty_list_is_404() {
    let backend = MockBackend::new();
    let (status, body) = send(app(&backend), "GET", "/hardware_inventory?name=Cable&pageNumber=1&limit=5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No hardware items found" }));
    assert_eq!(backend.released(), 1);
}

#[tokio::test]
async fn invalid_page_never_acquires() {
    let backend = MockBackend::new();
    let (status, body) = send(app(&backend), "GET", "/hardware_inventory?pageNumber=0&limit=5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert_eq!(backend.acquired(), 0);
}

#[tokio::test]
async fn create_binds_four_args_and_echoes_name() {
    let backend = MockBackend::new();
    let (status, body) = send(app(&backend), "POST", "/hardware_inventory", Some(cable())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "name": "Cable" }));
    assert_eq!(
        backend.calls(),
        vec![(
            "CALL `create_hardware_item`(?, ?, ?, ?)".to_string(),
            vec![
                BindValue::String("Cable".into()),
                BindValue::String("CA-001".into()),
                BindValue::String("Accessory".into()),
                BindValue::String("USB-C".into()),
            ]
        )]
    );
    assert_eq!((backend.acquired(), backend.released()), (1, 1));
}

#[tokio::test]
async fn create_missing_field_is_400_without_session() {
    let backend = MockBackend::new();
    let (status, body) = send(
        app(&backend),
        "POST",
        "/hardware_inventory",
        Some(json!({ "name": "Cable", "category": "Accessory" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "label is required");
    assert_eq!(backend.acquired(), 0);
}

#[tokio::test]
async fn create_rejected_by_backend_is_400_verbatim() {
    let backend = MockBackend::new();
    backend.reply(MockReply::Fail(SessionError::ValidationDeferred(
        "Duplicate entry 'CA-001' for key 'label'".into(),
    )));
    let (status, body) = send(app(&backend), "POST", "/hardware_inventory", Some(cable())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to add new hardware item");
    assert_eq!(body["details"], "Duplicate entry 'CA-001' for key 'label'");
    assert_eq!(backend.released(), 1);
}

#[tokio::test]
async fn batch_create_is_201() {
    let backend = MockBackend::new();
    let (status, body) = send(
        app(&backend),
        "POST",
        "/hardware_inventory/batch",
        Some(json!({ "name": "Pi 5", "category": "Board", "quantity": 4, "link": "https://example.com/pi5" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "New hardware items added successfully");
    let (sql, params) = &backend.calls()[0];
    assert_eq!(sql, "CALL `create_many_hardware_items`(?, ?, ?, ?, ?)");
    assert_eq!(params[2], BindValue::Null);
    assert_eq!(params[4], BindValue::I64(4));
}

#[tokio::test]
async fn read_present_and_absent() {
    let backend = MockBackend::new();
    backend.reply(MockReply::Rows(vec![json!({ "id": 7, "name": "Cable" })]));
    let (status, body) = send(app(&backend), "GET", "/hardware_inventory/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 7, "name": "Cable" }));

    let (status, body) = send(app(&backend), "GET", "/hardware_inventory/8", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No hardware item found" }));
    assert_eq!((backend.acquired(), backend.released()), (2, 2));
}

#[tokio::test]
async fn read_non_numeric_id_is_400() {
    let backend = MockBackend::new();
    let (status, _) = send(app(&backend), "GET", "/hardware_inventory/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.acquired(), 0);
}

#[tokio::test]
async fn details_read_out_param_on_same_session() {
    let backend = MockBackend::new();
    backend.reply(MockReply::Rows(Vec::new()));
    backend.reply(MockReply::Rows(vec![json!({ "result": r#"{"id":7,"parts":["plug"]}"# })]));
    let (status, body) = send(app(&backend), "GET", "/hardware_inventory/details/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 7, "parts": ["plug"] }));
    let sql: Vec<String> = backend.calls().into_iter().map(|(s, _)| s).collect();
    assert_eq!(
        sql,
        vec!["CALL `read_combined_hardware_details`(?, @result)", "SELECT @result AS `result`"]
    );
    assert_eq!((backend.acquired(), backend.released()), (1, 1));
}

#[tokio::test]
async fn update_is_204() {
    let backend = MockBackend::new();
    let (status, body) = send(app(&backend), "PUT", "/hardware_inventory/7", Some(cable())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(backend.calls()[0].1[0], BindValue::I64(7));
}

#[tokio::test]
async fn repeated_delete_releases_once_per_request() {
    let backend = MockBackend::new();
    backend.reply(MockReply::Rows(Vec::new()));
    backend.reply(MockReply::Fail(SessionError::ValidationDeferred("hardware item 7 does not exist".into())));

    let (first, _) = send(app(&backend), "DELETE", "/hardware_inventory/7", None).await;
    let (second, body) = send(app(&backend), "DELETE", "/hardware_inventory/7", None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to delete hardware item");
    assert_eq!((backend.acquired(), backend.released()), (2, 2));
}

#[tokio::test]
async fn backend_failure_is_500_with_details() {
    let backend = MockBackend::new();
    backend.reply(MockReply::Fail(SessionError::Backend("Lost connection to MySQL server".into())));
    let (status, body) = send(app(&backend), "DELETE", "/hardware_inventory/7", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Failed to delete hardware item", "details": "Lost connection to MySQL server" })
    );
    assert_eq!(backend.released(), 1);
}

#[tokio::test]
async fn unavailable_pool_is_500() {
    let backend = MockBackend::new();
    backend.fail_acquire("pool timed out while waiting for an open connection");
    let (status, body) = send(app(&backend), "GET", "/hardware_inventory/categories", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to retrieve categories");
    assert_eq!(backend.released(), 0);
}

#[tokio::test]
async fn change_status_binds_id_and_status() {
    let backend = MockBackend::new();
    let (status, _) = send(app(&backend), "POST", "/hardware_inventory/7/retired", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        backend.calls(),
        vec![(
            "CALL `change_hardware_item_status`(?, ?)".to_string(),
            vec![BindValue::I64(7), BindValue::String("retired".into())]
        )]
    );
}

#[tokio::test]
async fn bad_status_is_400() {
    let backend = MockBackend::new();
    let (status, _) = send(app(&backend), "POST", "/hardware_inventory/7/not%20a%20status", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.acquired(), 0);
}

#[tokio::test]
async fn categories_list() {
    let backend = MockBackend::new();
    backend.reply(MockReply::Rows(vec![json!({ "category": "Accessory" }), json!({ "category": "Board" })]));
    let (status, body) = send(app(&backend), "GET", "/hardware_inventory/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemCount"], 2);

    let (status, body) = send(app(&backend), "GET", "/hardware_inventory/categories", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No categories found");
}

#[tokio::test]
async fn ready_reflects_pool() {
    let backend = MockBackend::new();
    let (status, body) = send(app(&backend), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    assert_eq!(backend.released(), 1);

    let down = MockBackend::new();
    down.fail_acquire("connection refused");
    let (status, body) = send(app(&down), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn health_and_schemas() {
    let backend = MockBackend::new();
    let (status, body) = send(app(&backend), "GET", "/health", None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "status": "ok" })));

    let (status, body) = send(app(&backend), "GET", "/schemas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["components"]["schemas"]["BatchCreateBody"].is_object());
    assert_eq!(backend.acquired(), 0);
}

async fn send_raw(app: Router, method: &str, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let response = app.oneshot(builder.body(Body::from(body.to_string())).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn truncated_body_is_400_envelope() {
    let backend = MockBackend::new();
    let (status, body) = send_raw(app(&backend), "POST", "/hardware_inventory", Some("application/json"), r#"{"name": "Cable""#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert!(body["details"].is_string());
    assert_eq!(backend.acquired(), 0);
}

#[tokio::test]
async fn body_without_content_type_is_400_envelope() {
    let backend = MockBackend::new();
    let (status, body) = send_raw(app(&backend), "POST", "/hardware_inventory/batch", None, &cable().to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert!(body["details"].as_str().unwrap().contains("Content-Type"));
    assert_eq!(backend.acquired(), 0);
}

#[tokio::test]
async fn non_json_update_body_is_400_envelope() {
    let backend = MockBackend::new();
    let (status, body) = send_raw(app(&backend), "PUT", "/hardware_inventory/7", Some("text/plain"), "name=Cable").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert_eq!(backend.acquired(), 0);
}
