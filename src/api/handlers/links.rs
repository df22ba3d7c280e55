//! Handlers for link endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse};
use crate::api::extract::JsonOrForm;
use crate::error::AppError;
use crate::state::AppState;

/// Validates a URL and stores it under a new short code.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// JSON, `application/x-www-form-urlencoded` or `multipart/form-data`:
///
/// ```json
/// {
///   "url": "example.com/page",
///   "code": "my-link"          // optional
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: Link stored, body is the link record
/// - **400 Bad Request**: URL missing or rejected, or custom code malformed
/// - **409 Conflict**: Custom code already taken
/// - **503 Service Unavailable**: No free generated code found
pub async fn create_link_handler(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let url = payload.url.unwrap_or_default();

    let link = state
        .link_service
        .create_link(&url, payload.code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Response
///
/// ```json
/// { "success": true, "message": "Link deleted successfully" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse::deleted()))
}
