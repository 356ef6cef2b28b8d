//! Standard response envelope helpers.

use crate::error::AppError;
use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Success envelope: `{ success: true, message, data? }`.
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub type ApiResponse<T> = (StatusCode, Json<Envelope<T>>);

fn envelope<T: Serialize>(status: StatusCode, message: impl Into<String>, data: Option<T>) -> ApiResponse<T> {
    (
        status,
        Json(Envelope {
            success: true,
            message: message.into(),
            data,
        }),
    )
}

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> ApiResponse<T> {
    envelope(StatusCode::OK, message, Some(data))
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> ApiResponse<T> {
    envelope(StatusCode::CREATED, message, Some(data))
}

/// 200 with message only, e.g. after a delete.
pub fn ok_message(message: impl Into<String>) -> ApiResponse<()> {
    envelope(StatusCode::OK, message, None)
}

/// Empty collections are reported as 404 with `No <things> found`; everything else is 200.
pub fn many<T: Serialize>(rows: Vec<T>, things: &str) -> Result<ApiResponse<Vec<T>>, AppError> {
    if rows.is_empty() {
        return Err(AppError::NotFound(format!("No {} found", things)));
    }
    let message = format!("{} retrieved successfully", capitalize(things));
    Ok(envelope(StatusCode::OK, message, Some(rows)))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
