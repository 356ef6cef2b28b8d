use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::model::ReviewBody;
use crate::response::{self, ok, ok_message};
use crate::service::validation::{self as v, MAX_TEXT_LEN};
use crate::service::ReviewService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

const MIN_RATING: i64 = 1;
const MAX_RATING: i64 = 5;

pub async fn create_review(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ReviewBody>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = v::required("userId", body.user_id)?;
    let restaurant_id = v::required("restaurantId", body.restaurant_id)?;
    let rating = v::required("rating", body.rating)?;
    v::between("rating", rating.into(), MIN_RATING, MAX_RATING)?;
    let comment = v::optional_text("comment", body.comment, MAX_TEXT_LEN)?;
    let review = ReviewService::create(&state.pool, user_id, restaurant_id, rating, comment.as_deref()).await?;
    Ok(response::created("Review added successfully", review))
}

pub async fn restaurant_reviews(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = ReviewService::for_restaurant(&state.pool, restaurant_id).await?;
    response::many(rows, "reviews")
}

pub async fn user_reviews(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = ReviewService::for_user(&state.pool, user_id).await?;
    response::many(rows, "reviews")
}

pub async fn update_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ReviewBody>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(r) = body.rating {
        v::between("rating", r.into(), MIN_RATING, MAX_RATING)?;
    }
    let comment = v::optional_text("comment", body.comment, MAX_TEXT_LEN)?;
    let review = ReviewService::update(&state.pool, id, body.rating, comment)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".into()))?;
    Ok(ok("Review updated successfully", review))
}

pub async fn delete_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !ReviewService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Review not found".into()));
    }
    Ok(ok_message("Review deleted successfully"))
}
