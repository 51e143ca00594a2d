//! Error types for smartfin-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use smartfin_core::CoreError;
use thiserror::Error;

/// JSON envelope shared by every API response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

impl ApiResponse<()> {
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Core(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Core(err) => err.log("api"),
            _ if status.is_server_error() => log::error!("Request failed: {}", self),
            _ => log::debug!("Rejected request: {}", self),
        }
        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
