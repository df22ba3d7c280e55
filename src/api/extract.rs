//! Request body extractor accepting JSON or form payloads.

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Deserializes the request body according to its content type:
///
/// - `application/x-www-form-urlencoded` as a form
/// - `multipart/form-data` from its text fields (file parts are skipped)
/// - anything else as JSON
///
/// Any rejection (bad syntax, wrong field types, unreadable body) becomes
/// [`AppError::MalformedBody`].
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

enum BodyKind {
    UrlEncoded,
    Multipart,
    Json,
}

fn body_kind(req: &Request) -> BodyKind {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyKind::UrlEncoded
    } else if content_type.starts_with("multipart/form-data") {
        BodyKind::Multipart
    } else {
        BodyKind::Json
    }
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::UrlEncoded => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
                read_multipart(multipart).await.map(Self)
            }
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
                Ok(Self(value))
            }
        }
    }
}

/// Collects named text parts into an object and deserializes it. A repeated
/// name keeps its first value.
async fn read_multipart<T: DeserializeOwned>(mut multipart: Multipart) -> Result<T, AppError> {
    let mut fields = Map::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedBody(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if field.file_name().is_some() || fields.contains_key(&name) {
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?;
        fields.insert(name, Value::String(text));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::MalformedBody(e.to_string()))
}
