//! API error type and its mapping to HTTP responses.
//!
//! Errors caused by the request (bad dimensions, a box that does not fit the
//! sheet) become `422 Unprocessable Entity` with a JSON body naming the
//! offending field. Everything else is a `500`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fingerbox_joinery::GeneratorError;
use serde::Serialize;
use std::io;
use thiserror::Error;
use tracing::error;

/// Errors returned by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Writing the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The blocking generation task panicked or was cancelled.
    #[error("Generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Generator(GeneratorError::Validation(_))
            | Self::Generator(GeneratorError::SheetTooLarge { .. })
            | Self::Generator(GeneratorError::EdgeTooLong { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let message = self.to_string();
        match self {
            Self::Generator(GeneratorError::Validation(err)) => ErrorBody {
                error: "invalid_dimensions",
                message,
                field: Some(err.axis().field_name()),
                value: Some(err.value()),
                limit: err.limit(),
            },
            Self::Generator(GeneratorError::SheetTooLarge {
                required_area,
                max_area,
                ..
            }) => ErrorBody {
                error: "sheet_too_large",
                message,
                field: None,
                value: Some(*required_area),
                limit: Some(*max_area),
            },
            Self::Generator(GeneratorError::EdgeTooLong { length, max }) => ErrorBody {
                error: "edge_too_long",
                message,
                field: None,
                value: Some(*length),
                limit: Some(*max),
            },
            _ => ErrorBody {
                error: "internal",
                message,
                field: None,
                value: None,
                limit: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}
