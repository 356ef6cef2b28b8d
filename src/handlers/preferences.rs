//! Favourite cuisines and restaurants per user, and recommendations derived from them.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::model::{CuisinePreferenceBody, RestaurantPreferenceBody};
use crate::response::{self, ok_message};
use crate::service::validation as v;
use crate::service::PreferenceService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn cuisine_preferences(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = PreferenceService::cuisines(&state.pool, user_id).await?;
    response::many(rows, "cuisine preferences")
}

pub async fn add_cuisine_preference(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(body): ApiJson<CuisinePreferenceBody>,
) -> Result<impl IntoResponse, AppError> {
    let cuisine_id = v::required("cuisineId", body.cuisine_id)?;
    PreferenceService::add_cuisine(&state.pool, user_id, cuisine_id).await?;
    let rows = PreferenceService::cuisines(&state.pool, user_id).await?;
    Ok(response::created("Cuisine preference added successfully", rows))
}

pub async fn remove_cuisine_preference(
    State(state): State<AppState>,
    ApiPath((user_id, cuisine_id)): ApiPath<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    if !PreferenceService::remove_cuisine(&state.pool, user_id, cuisine_id).await? {
        return Err(AppError::NotFound("Cuisine preference not found".into()));
    }
    Ok(ok_message("Cuisine preference removed successfully"))
}

pub async fn restaurant_preferences(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = PreferenceService::restaurants(&state.pool, user_id).await?;
    response::many(rows, "restaurant preferences")
}

pub async fn add_restaurant_preference(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(body): ApiJson<RestaurantPreferenceBody>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant_id = v::required("restaurantId", body.restaurant_id)?;
    PreferenceService::add_restaurant(&state.pool, user_id, restaurant_id).await?;
    let rows = PreferenceService::restaurants(&state.pool, user_id).await?;
    Ok(response::created("Restaurant preference added successfully", rows))
}

pub async fn remove_restaurant_preference(
    State(state): State<AppState>,
    ApiPath((user_id, restaurant_id)): ApiPath<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    if !PreferenceService::remove_restaurant(&state.pool, user_id, restaurant_id).await? {
        return Err(AppError::NotFound("Restaurant preference not found".into()));
    }
    Ok(ok_message("Restaurant preference removed successfully"))
}

pub async fn recommendations(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = PreferenceService::recommendations(&state.pool, user_id).await?;
    response::many(rows, "recommendations")
}
