// 🌐 Receipt API - axum handlers, router and error mapping
//
// POST /receipts/process      → {"id": "..."}
// GET  /receipts/:id/points   → {"points": N}

use crate::error::{ReceiptIdError, StoreError};
use crate::points::calculate_points;
use crate::receipt::{Receipt, ReceiptId};
use crate::store::PointsStore;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

// ============================================================================
// STATE
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PointsStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PointsStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Error body returned with every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    /// Malformed receipt body or lookup path
    BadRequest(String),
    /// Unknown receipt id
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ReceiptIdError> for AppError {
    fn from(e: ReceiptIdError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /receipts/process - Score a receipt and remember its points
///
/// The body is decoded as JSON whatever its Content-Type says.
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, AppError> {
    let receipt = Receipt::from_json(&body).map_err(|e| {
        warn!(error = %e, "Rejecting receipt body");
        AppError::BadRequest(format!("Invalid receipt JSON: {}", e))
    })?;

    let points = calculate_points(&receipt);
    let id = ReceiptId::generate();

    state.store.put(id.clone(), points)?;
    info!(%id, points, retailer = %receipt.retailer, "Processed receipt");

    Ok(Json(ProcessResponse { id: id.to_string() }))
}

/// GET /receipts/:id/points - Points previously awarded to a receipt
pub async fn get_points(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PointsResponse>, AppError> {
    let Path(raw_id) = path.map_err(|e| AppError::BadRequest(format!("Invalid URL format: {}", e)))?;
    let id = ReceiptId::parse(&raw_id)?;

    match state.store.get(&id) {
        Some(points) => {
            debug!(%id, points, "Points lookup");
            Ok(Json(PointsResponse { points }))
        }
        None => Err(AppError::NotFound(format!("No receipt found for id {}", id))),
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Build the application router. Unmatched paths fall through to 404.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const CORNER_MARKET: &str = r#"{
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"}
        ],
        "total": "9.00"
    }"#;

    fn test_app() -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let app = create_router(AppState::new(store.clone()));
        (app, store)
    }

    async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_process_stores_points() {
        let (app, store) = test_app();

        let (status, body) = send(app, "POST", "/receipts/process", CORNER_MARKET).await;

        assert_eq!(status, StatusCode::OK);
        let response: ProcessResponse = serde_json::from_slice(&body).unwrap();
        let id = ReceiptId::parse(&response.id).unwrap();
        assert_eq!(store.get(&id), Some(109));
    }

    #[tokio::test]
    async fn test_process_without_content_type() {
        let (app, store) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/receipts/process")
            .body(Body::from(CORNER_MARKET))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_process_invalid_json_is_bad_request() {
        let (app, store) = test_app();

        let (status, body) = send(app, "POST", "/receipts/process", "{\"retailer\": ").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "BAD_REQUEST");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_process_wrong_field_type_is_bad_request() {
        let (app, store) = test_app();

        let (status, _) = send(app, "POST", "/receipts/process", r#"{"items": 3}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_get_points_for_known_id() {
        let (app, store) = test_app();
        let id = ReceiptId::generate();
        store.put(id.clone(), 28).unwrap();

        let uri = format!("/receipts/{}/points", id);
        let (status, body) = send(app, "GET", &uri, "").await;

        assert_eq!(status, StatusCode::OK);
        let response: PointsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.points, 28);
    }

    #[tokio::test]
    async fn test_get_points_unknown_id_is_not_found() {
        let (app, _) = test_app();

        let (status, body) = send(app, "GET", "/receipts/never-issued/points", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_points_malformed_id_is_bad_request() {
        let (app, _) = test_app();

        let (status, _) = send(app, "GET", "/receipts/abc%20def/points", "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_points_undecodable_id_is_bad_request() {
        let (app, _) = test_app();

        // %FF alone is not valid UTF-8
        let (status, body) = send(app, "GET", "/receipts/%FF/points", "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_process_null_fields_are_accepted() {
        let (app, store) = test_app();
        let body = r#"{"retailer": "T", "items": null, "total": null}"#;

        let (status, body) = send(app, "POST", "/receipts/process", body).await;

        assert_eq!(status, StatusCode::OK);
        let response: ProcessResponse = serde_json::from_slice(&body).unwrap();
        let id = ReceiptId::parse(&response.id).unwrap();
        // Only the retailer name scores
        assert_eq!(store.get(&id), Some(1));
    }

    #[tokio::test]
    async fn test_unmatched_routes() {
        let (app, _) = test_app();
        let (status, _) = send(app, "GET", "/receipts/abc/total", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (app, _) = test_app();
        let (status, _) = send(app, "GET", "/receipts/process", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        // Only a single id segment is routed
        let (app, store) = test_app();
        store.put(ReceiptId::parse("abc").unwrap(), 7).unwrap();
        let (status, _) = send(app, "GET", "/receipts/abc/extra/points", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
