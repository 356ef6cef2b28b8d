use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::model::{NewPayment, PaymentBody, PaymentStatus, PaymentStatusBody};
use crate::response::{self, ok, ok_message};
use crate::service::validation::{self as v, MAX_NAME_LEN};
use crate::service::PaymentService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest value a `NUMERIC(10, 2)` column holds.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn parse_status(raw: &str) -> Result<PaymentStatus, AppError> {
    raw.parse().map_err(|e: crate::model::UnknownVariant| AppError::Validation(e.to_string()))
}

fn new_payment(body: PaymentBody) -> Result<NewPayment, AppError> {
    let reservation_id = v::required("reservationId", body.reservation_id)?;
    let user_id = v::required("userId", body.user_id)?;
    let amount = v::required("amount", body.amount)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if amount < Decimal::ZERO {
        return Err(AppError::Validation("amount must not be negative".into()));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::Validation(format!("amount must not exceed {}", MAX_AMOUNT)));
    }
    let status = match body.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => PaymentStatus::Completed,
    };
    Ok(NewPayment {
        reservation_id,
        user_id,
        amount,
        payment_method: v::required_text("paymentMethod", body.payment_method, MAX_NAME_LEN)?,
        status,
    })
}

pub async fn create_payment(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PaymentBody>,
) -> Result<impl IntoResponse, AppError> {
    let payment = new_payment(body)?;
    let created = PaymentService::create(&state.pool, &payment).await?;
    Ok(response::created("Payment added successfully", created))
}

pub async fn get_payment(
    State(state): State<AppState>,
    ApiPath(payment_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let payment = PaymentService::find(&state.pool, payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".into()))?;
    Ok(ok("Payment retrieved successfully", payment))
}

pub async fn reservation_payments(
    State(state): State<AppState>,
    ApiPath(reservation_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = PaymentService::for_reservation(&state.pool, reservation_id).await?;
    response::many(rows, "payments")
}

pub async fn user_payments(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = PaymentService::for_user(&state.pool, user_id).await?;
    response::many(rows, "payments")
}

pub async fn update_payment_status(
    State(state): State<AppState>,
    ApiPath(payment_id): ApiPath<i64>,
    ApiJson(body): ApiJson<PaymentStatusBody>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status(&v::required("status", body.status)?)?;
    let payment = PaymentService::set_status(&state.pool, payment_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".into()))?;
    tracing::info!(payment_id, %status, "payment status changed");
    Ok(ok("Payment status updated successfully", payment))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    ApiPath(payment_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !PaymentService::delete(&state.pool, payment_id).await? {
        return Err(AppError::NotFound("Payment not found".into()));
    }
    Ok(ok_message("Payment deleted successfully"))
}
