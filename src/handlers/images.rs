//! Restaurant image handlers: metadata listing, upload, raw download, delete.

use crate::error::AppError;
use crate::extractors::ApiPath;
use crate::handlers::upload::read_form;
use crate::response::{self, ok_message};
use crate::service::{ImageService, RestaurantService};
use crate::state::AppState;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

const IMAGE_PART: &str = "image";

pub async fn list_images(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = ImageService::list(&state.pool, restaurant_id).await?;
    response::many(rows, "images")
}

/// POST /api/restaurants/:id/images: one or more `image` parts.
pub async fn upload_images(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;
    let images = form
        .take_files(IMAGE_PART)
        .into_iter()
        .map(|f| f.into_image())
        .collect::<Result<Vec<_>, _>>()?;
    if images.is_empty() {
        return Err(AppError::Validation(format!("{} is required", IMAGE_PART)));
    }
    if RestaurantService::find(&state.pool, restaurant_id).await?.is_none() {
        return Err(AppError::NotFound("Restaurant not found".into()));
    }
    let stored = ImageService::add(&state.pool, restaurant_id, images).await?;
    tracing::info!(restaurant_id, count = stored.len(), "images uploaded");
    Ok(response::created("Images uploaded successfully", stored))
}

pub async fn get_image(
    State(state): State<AppState>,
    ApiPath(image_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let data = ImageService::data(&state.pool, image_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))?;
    Ok(([(header::CONTENT_TYPE, data.content_type)], data.image))
}

pub async fn delete_image(
    State(state): State<AppState>,
    ApiPath(image_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !ImageService::delete(&state.pool, image_id).await? {
        return Err(AppError::NotFound("Image not found".into()));
    }
    Ok(ok_message("Image deleted successfully"))
}
