//! Restaurant membership: staff with positions, and admins.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::model::MemberBody;
use crate::response::{self, ok_message};
use crate::service::validation::{self as v, MAX_NAME_LEN};
use crate::service::StaffService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn list_staff(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = StaffService::list(&state.pool, restaurant_id).await?;
    response::many(rows, "staff members")
}

pub async fn add_staff(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
    ApiJson(body): ApiJson<MemberBody>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = v::required("userId", body.user_id)?;
    v::positive("userId", user_id)?;
    let position = v::optional_text("position", body.position, MAX_NAME_LEN)?;
    let member = StaffService::add(&state.pool, restaurant_id, user_id, position.as_deref()).await?;
    Ok(response::created("Staff member added successfully", member))
}

pub async fn remove_staff(
    State(state): State<AppState>,
    ApiPath((restaurant_id, user_id)): ApiPath<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    if !StaffService::remove(&state.pool, restaurant_id, user_id).await? {
        return Err(AppError::NotFound("Staff member not found".into()));
    }
    Ok(ok_message("Staff member removed successfully"))
}

pub async fn list_admins(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = StaffService::admins(&state.pool, restaurant_id).await?;
    response::many(rows, "admins")
}

pub async fn add_admin(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
    ApiJson(body): ApiJson<MemberBody>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = v::required("userId", body.user_id)?;
    v::positive("userId", user_id)?;
    let admin = StaffService::add_admin(&state.pool, restaurant_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(response::created("Admin added successfully", admin))
}
