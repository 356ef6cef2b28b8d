//! Per-request session context: the user and restaurant the client is acting as.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const RESTAURANT_ID_HEADER: &str = "X-Restaurant-Id";

/// Identifiers returned by login that the client sends back on each request.
/// Both are optional; handlers that need one call [`SessionContext::user_id`] or
/// [`SessionContext::restaurant_id`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: Option<i64>,
    pub restaurant_id: Option<i64>,
}

impl SessionContext {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.user_id
            .ok_or_else(|| AppError::BadRequest(format!("{} header is required", USER_ID_HEADER)))
    }

    pub fn restaurant_id(&self) -> Result<i64, AppError> {
        self.restaurant_id
            .ok_or_else(|| AppError::BadRequest(format!("{} header is required", RESTAURANT_ID_HEADER)))
    }
}

fn header_id(parts: &Parts, name: &str) -> Result<Option<i64>, AppError> {
    let Some(raw) = parts.headers.get(name) else {
        return Ok(None);
    };
    let s = raw
        .to_str()
        .map_err(|_| AppError::BadRequest(format!("{} must be a number", name)))?
        .trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("{} must be a number", name)))
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionContext {
            user_id: header_id(parts, USER_ID_HEADER)?,
            restaurant_id: header_id(parts, RESTAURANT_ID_HEADER)?,
        })
    }
}
