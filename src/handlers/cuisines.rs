use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::model::CuisineBody;
use crate::response::{self, ok, ok_message};
use crate::service::validation::{self as v, MAX_NAME_LEN, MAX_TEXT_LEN};
use crate::service::CuisineService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn list_cuisines(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CuisineService::list(&state.pool).await?;
    response::many(rows, "cuisines")
}

pub async fn get_cuisine(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let cuisine = CuisineService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cuisine not found".into()))?;
    Ok(ok("Cuisine retrieved successfully", cuisine))
}

pub async fn create_cuisine(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CuisineBody>,
) -> Result<impl IntoResponse, AppError> {
    let name = v::required_text("name", body.name, MAX_NAME_LEN)?;
    let description = v::optional_text("description", body.description, MAX_TEXT_LEN)?;
    let cuisine = CuisineService::create(&state.pool, &name, description.as_deref()).await?;
    Ok(response::created("Cuisine added successfully", cuisine))
}

pub async fn update_cuisine(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<CuisineBody>,
) -> Result<impl IntoResponse, AppError> {
    let name = v::optional_text("name", body.name, MAX_NAME_LEN)?;
    let description = v::optional_text("description", body.description, MAX_TEXT_LEN)?;
    let cuisine = CuisineService::update(&state.pool, id, name, description)
        .await?
        .ok_or_else(|| AppError::NotFound("Cuisine not found".into()))?;
    Ok(ok("Cuisine updated successfully", cuisine))
}

pub async fn delete_cuisine(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !CuisineService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Cuisine not found".into()));
    }
    Ok(ok_message("Cuisine deleted successfully"))
}
