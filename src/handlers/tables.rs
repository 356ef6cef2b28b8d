//! Dining table handlers, including the availability lookups backed by stored routines.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::model::{AvailableTablesQuery, NewTable, SlotQuery, TableAvailability, TableStatus, TableStatusBody, UpdateTable};
use crate::response::{self, ok, ok_message};
use crate::service::validation as v;
use crate::service::TableService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn restaurant_tables(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = TableService::list_for_restaurant(&state.pool, restaurant_id).await?;
    response::many(rows, "tables")
}

/// GET /api/tables/available?restaurantId&date&time&partySize
pub async fn available_tables(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<AvailableTablesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant_id = v::required("restaurantId", q.restaurant_id)?;
    let date = v::date("date", &v::required("date", q.date)?)?;
    let time = v::time("time", &v::required("time", q.time)?)?;
    let party_size = v::required("partySize", q.party_size)?;
    v::positive("partySize", party_size.into())?;
    let rows = TableService::available(&state.pool, restaurant_id, date, time, party_size).await?;
    response::many(rows, "available tables")
}

pub async fn create_table(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewTable>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant_id = v::required("restaurantId", body.restaurant_id)?;
    let table_number = v::required("tableNumber", body.table_number)?;
    let capacity = v::required("capacity", body.capacity)?;
    v::positive("tableNumber", table_number.into())?;
    v::positive("capacity", capacity.into())?;
    let table = TableService::create(&state.pool, restaurant_id, table_number, capacity).await?;
    Ok(response::created("Table added successfully", table))
}

pub async fn get_table(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let table = TableService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Table not found".into()))?;
    Ok(ok("Table retrieved successfully", table))
}

pub async fn update_table(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateTable>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(n) = body.table_number {
        v::positive("tableNumber", n.into())?;
    }
    if let Some(c) = body.capacity {
        v::positive("capacity", c.into())?;
    }
    let table = TableService::update(&state.pool, id, body.table_number, body.capacity)
        .await?
        .ok_or_else(|| AppError::NotFound("Table not found".into()))?;
    Ok(ok("Table updated successfully", table))
}

pub async fn update_table_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<TableStatusBody>,
) -> Result<impl IntoResponse, AppError> {
    let status: TableStatus = v::required("status", body.status)?
        .parse()
        .map_err(|e: crate::model::UnknownVariant| AppError::Validation(e.to_string()))?;
    let table = TableService::set_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Table not found".into()))?;
    Ok(ok("Table status updated", table))
}

pub async fn delete_table(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !TableService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Table not found".into()));
    }
    Ok(ok_message("Table deleted successfully"))
}

/// GET /api/tables/:id/availability?date&time
pub async fn table_availability(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(q): ApiQuery<SlotQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = v::date("date", &v::required("date", q.date)?)?;
    let time = v::time("time", &v::required("time", q.time)?)?;
    let available = TableService::is_available(&state.pool, id, date, time)
        .await?
        .ok_or_else(|| AppError::NotFound("Table not found".into()))?;
    Ok(ok(
        "Table availability retrieved successfully",
        TableAvailability { table_id: id, available },
    ))
}
