use crate::catalog::{CatalogError, CatalogService};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => AppError::BadRequest(e.to_string()),
            CatalogError::NotFound(id) => {
                AppError::NotFound(format!("Review not found with ID: {id}"))
            }
            CatalogError::Upstream(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Client errors carry no body
            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Internal(message) => {
                error!("Internal error: {}", message);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(ErrorResponse {
                    error: status.to_string(),
                    message,
                });
                (status, body).into_response()
            }
        }
    }
}
