//! Application error type and its HTTP mapping.
//!
//! Every rejection produced by the link-creation pipeline is a distinct
//! variant, so handlers can return `Result<_, AppError>` and let
//! [`IntoResponse`] pick the status code and user-facing message.
//!
//! # Response Body
//!
//! ```json
//! { "error": "URL is required", "kind": "input_missing" }
//! ```
//!
//! [`AppError::Internal`] carries a context string that is logged but never
//! serialized.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::utils::db_error::is_unique_violation_on_code;

/// Serialized error payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("URL is required")]
    InputMissing,

    #[error("Invalid request body")]
    MalformedBody(String),

    #[error("Invalid URL format or domain extension. Please enter a valid website address.")]
    FormatInvalid,

    #[error(
        "The domain \"{hostname}\" does not exist or cannot be reached. Please check the URL and try again."
    )]
    DomainUnreachable { hostname: String },

    #[error("{message}")]
    SpecialShapeInvalid { message: String },

    #[error("Invalid code format. Use 2-20 alphanumeric characters, hyphens, or underscores")]
    CodeFormatInvalid,

    #[error("This code is already in use. Please choose another one.")]
    CodeConflict { code: String },

    #[error("Could not allocate a unique code. Please try again.")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Link not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn internal(context: impl Into<String>) -> Self {
        Self::Internal(context.into())
    }

    /// Machine-readable classification sent alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InputMissing => "input_missing",
            AppError::MalformedBody(_) => "malformed_body",
            AppError::FormatInvalid => "format_invalid",
            AppError::DomainUnreachable { .. } => "domain_unreachable",
            AppError::SpecialShapeInvalid { .. } => "special_shape_invalid",
            AppError::CodeFormatInvalid => "code_format_invalid",
            AppError::CodeConflict { .. } => "code_conflict",
            AppError::CodeSpaceExhausted { .. } => "code_space_exhausted",
            AppError::NotFound => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InputMissing
            | AppError::MalformedBody(_)
            | AppError::FormatInvalid
            | AppError::DomainUnreachable { .. }
            | AppError::SpecialShapeInvalid { .. }
            | AppError::CodeFormatInvalid => StatusCode::BAD_REQUEST,
            AppError::CodeConflict { .. } => StatusCode::CONFLICT,
            AppError::CodeSpaceExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(context) => {
                tracing::error!(context = %context, "Request failed with internal error");
            }
            AppError::MalformedBody(reason) => {
                tracing::debug!(reason = %reason, "Rejected malformed request body");
            }
            _ => {}
        }

        (self.status(), Json(self.to_error_body())).into_response()
    }
}

/// Unique violations on the `code` column become [`AppError::CodeConflict`];
/// anything else is an opaque internal failure.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return AppError::CodeConflict {
                code: String::new(),
            };
        }

        AppError::Internal(format!("Database error: {e}"))
    }
}
