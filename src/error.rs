//! Typed errors and HTTP mapping.

use crate::checkout::CheckoutError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every failure that is not the caller's fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("checkout: {0}")]
    Checkout(#[from] CheckoutError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Db(_) | AppError::Checkout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) | AppError::Db(sqlx::Error::RowNotFound) => "not_found",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Config(_) => "config_error",
            AppError::Db(_) => "database_error",
            AppError::Checkout(_) => "checkout_error",
        }
    }

    /// Body message. Store, checkout and config failures never leak their detail.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::InvalidInput(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Db(sqlx::Error::RowNotFound) => "not found".to_string(),
            AppError::Config(_) | AppError::Db(_) | AppError::Checkout(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "request rejected");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.public_message(),
            },
        };
        (status, Json(body)).into_response()
    }
}
