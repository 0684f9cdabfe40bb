//! HTTP surface: routing, status mapping and JSON bodies.

use crate::error::AnalyticsError;
use crate::service::{self, AnalyzeRequest, PredictRequest};
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "energy-analytics";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/analyze", post(analyze_handler))
        .layer(CorsLayer::permissive())
}

/// Map an analytics error to its response status.
pub fn status_for(err: &AnalyticsError) -> StatusCode {
    match err {
        AnalyticsError::Validation(_) | AnalyticsError::InsufficientData { .. } => {
            StatusCode::BAD_REQUEST
        }
        AnalyticsError::Timestamp(_)
        | AnalyticsError::EmptyInput
        | AnalyticsError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(endpoint: &str, err: &AnalyticsError) -> Response {
    let status = status_for(err);
    let message = if status.is_server_error() {
        error!(endpoint, error = %err, "Request failed");
        format!("Internal server error: {err}")
    } else {
        warn!(endpoint, error = %err, "Request rejected");
        err.to_string()
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_owned(),
        service: SERVICE_NAME.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

async fn predict_handler(body: Bytes) -> Response {
    let result = service::parse_request::<PredictRequest>(&body)
        .and_then(|request| service::predict(&request, Local::now().naive_local()));
    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response("/api/predict", &err),
    }
}

async fn analyze_handler(body: Bytes) -> Response {
    let result = service::parse_request::<AnalyzeRequest>(&body)
        .and_then(|request| service::analyze(&request));
    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response("/api/analyze", &err),
    }
}
