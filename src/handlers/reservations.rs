//! Reservation handlers. Creation and every status transition go through stored routines.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::model::{ApproveBody, DailyQuery, NewReservation, ReservationBody, ReservationStatus};
use crate::response::{self, ok, ok_message};
use crate::service::validation::{self as v, MAX_TEXT_LEN};
use crate::service::ReservationService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

fn new_reservation(user_id: i64, body: ReservationBody) -> Result<NewReservation, AppError> {
    let restaurant_id = v::required("restaurantId", body.restaurant_id)?;
    let date = v::date("reservationDate", &v::required("reservationDate", body.reservation_date)?)?;
    let time = v::time("reservationTime", &v::required("reservationTime", body.reservation_time)?)?;
    let party_size = v::required("partySize", body.party_size)?;
    v::positive("partySize", party_size.into())?;
    Ok(NewReservation {
        user_id,
        restaurant_id,
        date,
        time,
        party_size,
        special_requests: v::optional_text("specialRequests", body.special_requests, MAX_TEXT_LEN)?,
    })
}

/// POST /api/reservations/:id where `:id` is the customer's user id.
pub async fn create_reservation(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(body): ApiJson<ReservationBody>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = new_reservation(user_id, body)?;
    let created = ReservationService::create(&state.pool, &reservation).await?;
    Ok(response::created("Reservation created successfully", created))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = ReservationService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
    Ok(ok("Reservation retrieved successfully", reservation))
}

pub async fn user_reservations(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = ReservationService::for_user(&state.pool, user_id).await?;
    response::many(rows, "reservations")
}

/// GET /api/reservations/restaurant/:restaurantId?date&status
pub async fn restaurant_reservations(
    State(state): State<AppState>,
    ApiPath(restaurant_id): ApiPath<i64>,
    ApiQuery(q): ApiQuery<DailyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = match q.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(d) => Some(v::date("date", d)?),
    };
    let status = match q.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            s.parse::<ReservationStatus>()
                .map_err(|e| AppError::Validation(e.to_string()))?,
        ),
    };
    let rows = ReservationService::for_restaurant(&state.pool, restaurant_id, date, status).await?;
    response::many(rows, "reservations")
}

pub async fn approve_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ApproveBody>,
) -> Result<impl IntoResponse, AppError> {
    let table_id = v::required("tableId", body.table_id)?;
    let reservation = ReservationService::approve(&state.pool, id, table_id).await?;
    tracing::info!(reservation_id = id, table_id, "reservation approved");
    Ok(ok("Reservation approved successfully", reservation))
}

pub async fn cancel_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = ReservationService::cancel(&state.pool, id).await?;
    tracing::info!(reservation_id = id, "reservation cancelled");
    Ok(ok("Reservation cancelled successfully", reservation))
}

pub async fn complete_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = ReservationService::complete(&state.pool, id).await?;
    tracing::info!(reservation_id = id, "reservation completed");
    Ok(ok("Reservation completed successfully", reservation))
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !ReservationService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Reservation not found".into()));
    }
    Ok(ok_message("Reservation deleted successfully"))
}
