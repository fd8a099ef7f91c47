//! HTTP handlers: map verbs to service calls and entities to transfer objects.

pub mod event;
pub mod event_type;
pub mod payment;
pub mod ticket_type;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;

/// Extracted body: malformed, missing or `null` bodies all become InvalidInput.
pub type JsonBody<T> = Result<Json<Option<T>>, JsonRejection>;

pub(crate) fn require_body<T>(payload: JsonBody<T>, what: &str) -> Result<T, AppError> {
    match payload {
        Ok(Json(Some(body))) => Ok(body),
        Ok(Json(None)) => Err(AppError::InvalidInput(format!("{} object is null", what))),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge(format!("{} body exceeds the size limit", what)))
        }
        Err(rejection) => Err(AppError::InvalidInput(format!("invalid {}: {}", what, rejection.body_text()))),
    }
}

pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::InvalidInput(format!("invalid id '{}'", id_str)))
}
