//! API Error Types
//!
//! Errors of the snapshot server and their JSON bodies. Chart lookups name
//! the slot they failed on so a client can tell a typo from a dashboard
//! that has not rendered yet.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::charts::SlotKind;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Path segment is not one of the four chart slots
    #[error("Unknown chart slot '{0}'")]
    UnknownSlot(String),

    /// Slot exists but no cycle has rendered it yet
    #[error("No live chart in slot '{0}'")]
    EmptySlot(SlotKind),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::UnknownSlot(_) => (StatusCode::NOT_FOUND, "UNKNOWN_SLOT"),
            ApiError::EmptySlot(_) => (StatusCode::NOT_FOUND, "SLOT_EMPTY"),
            ApiError::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }

    /// Slot name the request asked for, if the error concerns one
    fn slot(&self) -> Option<String> {
        match self {
            ApiError::UnknownSlot(name) => Some(name.clone()),
            ApiError::EmptySlot(kind) => Some(kind.name().to_string()),
            _ => None,
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Snapshot API failed"
            );
        } else {
            tracing::debug!(request_id = %request_id, error_code = %code, "{}", self);
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
                slot: self.slot(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
