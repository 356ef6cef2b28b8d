//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// SQLSTATE raised by `RAISE EXCEPTION` inside the reservation routines.
const RAISE_EXCEPTION: &str = "P0001";
/// `no_data_found`, raised by the routines when the target row does not exist.
const NO_DATA_FOUND: &str = "P0002";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migration: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Failure envelope: `{ success: false, message, error? }`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppError {
    /// Status code and client-facing message. Raw database text goes into `error` only for 500s.
    fn parts(&self) -> (StatusCode, String, Option<String>) {
        match self {
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone(), None),
            AppError::Validation(m) | AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone(), None),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone(), None),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m.clone(), None),
            AppError::Hash(m) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
                Some(m.clone()),
            ),
            AppError::Config(_) | AppError::Migrate(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
                Some(self.to_string()),
            ),
            AppError::Db(e) => classify_db_error(e),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

fn classify_db_error(e: &sqlx::Error) -> (StatusCode, String, Option<String>) {
    match e {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Record not found".into(), None),
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            match db.code().as_deref() {
                Some(RAISE_EXCEPTION) | Some(CHECK_VIOLATION) => (StatusCode::BAD_REQUEST, message, None),
                Some(NO_DATA_FOUND) => (StatusCode::NOT_FOUND, message, None),
                Some(FOREIGN_KEY_VIOLATION) => (
                    StatusCode::BAD_REQUEST,
                    "Referenced record does not exist".into(),
                    Some(message),
                ),
                Some(NUMERIC_VALUE_OUT_OF_RANGE) => (
                    StatusCode::BAD_REQUEST,
                    "Numeric value out of range".into(),
                    Some(message),
                ),
                Some(UNIQUE_VIOLATION) => (StatusCode::CONFLICT, "Record already exists".into(), Some(message)),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into(), Some(message)),
            }
        }
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database error".into(),
            Some(other.to_string()),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), %message, "request rejected");
        }
        let body = ErrorBody {
            success: false,
            message,
            error,
        };
        (status, Json(body)).into_response()
    }
}
