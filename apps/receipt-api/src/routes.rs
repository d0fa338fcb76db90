//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                      Success          Failure            │
//! │  ──────  ────                      ───────          ───────            │
//! │  POST    /receipts/create          201 + receipt    400 / 500          │
//! │  DELETE  /receipts/delete/{id}     200 + id         400 / 404 / 500    │
//! │  GET     /receipts/get/{id}        200 + receipt    400 / 404 / 500    │
//! │  GET     /receipts/get             200 + [receipt]  500                │
//! │  PATCH   /receipts/update/{id}     200 + receipt    400 / 404 / 500    │
//! │  GET     /ping                     200 pong                            │
//! │  GET     /health                   200 ok           503 unavailable    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers take their extractors as `Result` so a bad path segment or body
//! turns into a `DECODE_ERROR` body instead of axum's plain-text rejection.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, warn};

use receipt_core::{NewReceipt, Receipt, ReceiptPatch};

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route("/receipts/create", post(create_receipt))
        .route("/receipts/delete/{id}", delete(delete_receipt))
        .route("/receipts/get", get(list_receipts))
        .route("/receipts/get/{id}", get(get_receipt))
        .route("/receipts/update/{id}", patch(update_receipt))
        .with_state(state)
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.receipts.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        warn!("Health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}

async fn create_receipt(
    State(state): State<AppState>,
    body: Result<Json<NewReceipt>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Receipt>)> {
    let Json(candidate) = body?;
    debug!("POST /receipts/create");

    let receipt = state.receipts.create(candidate).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn delete_receipt(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<i64>> {
    let Path(id) = id?;
    debug!(id, "DELETE /receipts/delete");

    Ok(Json(state.receipts.delete(id).await?))
}

async fn get_receipt(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Receipt>> {
    let Path(id) = id?;
    debug!(id, "GET /receipts/get");

    Ok(Json(state.receipts.get(id).await?))
}

async fn list_receipts(State(state): State<AppState>) -> ApiResult<Json<Vec<Receipt>>> {
    debug!("GET /receipts/get");

    Ok(Json(state.receipts.list().await?))
}

async fn update_receipt(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ReceiptPatch>, JsonRejection>,
) -> ApiResult<Json<Receipt>> {
    let Path(id) = id?;
    let Json(patch) = body?;
    debug!(id, "PATCH /receipts/update");

    Ok(Json(state.receipts.update(id, patch).await?))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::service::ReceiptService;
    use crate::test_support::FailingStore;
    use receipt_db::{Database, DbConfig, ReceiptStore};

    async fn app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        app_with(Arc::new(db.receipts()))
    }

    fn app_with(store: Arc<dyn ReceiptStore>) -> Router {
        router(AppState::new(ReceiptService::new(store)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn kruto() -> Value {
        json!({
            "title": "Kruto",
            "author": "Chelovek",
            "description": "Delai chto hochesh"
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_with_id() {
        let app = app().await;

        let (status, body) = send(&app, Method::POST, "/receipts/create", Some(kruto())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].as_i64().unwrap() >= 1);
        assert_eq!(body["title"], "Kruto");
        assert!(body["created_at"].is_string());
        assert!(body["updated_at"].is_string());
    }

    #[tokio::test]
    async fn test_create_empty_object_lists_all_violations() {
        let app = app().await;

        let (status, body) = send(&app, Method::POST, "/receipts/create", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let violations = body["violations"].as_object().unwrap();
        assert_eq!(violations.len(), 3);
        assert!(violations.contains_key("title"));
        assert!(violations.contains_key("author"));
        assert!(violations.contains_key("description"));
    }

    #[tokio::test]
    async fn test_create_malformed_body_is_decode_error() {
        let app = app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/receipts/create")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_get_round_trip_and_missing() {
        let app = app().await;
        let (_, created) = send(&app, Method::POST, "/receipts/create", Some(kruto())).await;
        let id = created["id"].as_i64().unwrap();

        let (status, fetched) = send(&app, Method::GET, &format!("/receipts/get/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, body) = send(&app, Method::GET, "/receipts/get/500", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_decode_error() {
        let app = app().await;

        for (method, uri) in [
            (Method::GET, "/receipts/get/wda"),
            (Method::DELETE, "/receipts/delete/wda"),
        ] {
            let (status, body) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "DECODE_ERROR");
        }

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/receipts/update/wda",
            Some(json!({ "title": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_negative_id_is_not_found() {
        let app = app().await;

        let (status, body) = send(&app, Method::DELETE, "/receipts/delete/-1", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_title_only() {
        let app = app().await;
        for _ in 0..5 {
            send(&app, Method::POST, "/receipts/create", Some(kruto())).await;
        }

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/receipts/update/5",
            Some(json!({ "title": "Cinema" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 5);
        assert_eq!(body["title"], "Cinema");
        assert_eq!(body["author"], "Chelovek");
        assert_eq!(body["description"], "Delai chto hochesh");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let app = app().await;

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/receipts/update/42",
            Some(json!({ "title": "Cinema" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_returns_id_then_not_found() {
        let app = app().await;
        let (_, created) = send(&app, Method::POST, "/receipts/create", Some(kruto())).await;
        let uri = format!("/receipts/delete/{}", created["id"]);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created["id"]);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_empty_then_populated() {
        let app = app().await;

        let (status, body) = send(&app, Method::GET, "/receipts/get", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        send(&app, Method::POST, "/receipts/create", Some(kruto())).await;
        send(&app, Method::POST, "/receipts/create", Some(kruto())).await;

        let (_, body) = send(&app, Method::GET, "/receipts/get", None).await;
        let receipts: Vec<Receipt> = serde_json::from_value(body).unwrap();
        assert_eq!(receipts.len(), 2);
        assert!(receipts[0].id < receipts[1].id);
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let app = app_with(Arc::new(FailingStore));

        let (status, body) = send(&app, Method::GET, "/receipts/get", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORAGE_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("malformed"));

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
    }

    #[tokio::test]
    async fn test_ping_and_health() {
        let app = app().await;

        let (status, body) = send(&app, Method::GET, "/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
