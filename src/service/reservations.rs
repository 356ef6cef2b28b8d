//! Reservations. Creation and every status transition go through the stored routines, which
//! enforce the lifecycle rules and raise on violations.

use crate::error::AppError;
use crate::model::{CustomerReservation, NewReservation, Reservation, ReservationStatus, StaffReservation};
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct ReservationService;

impl ReservationService {
    pub async fn create(pool: &PgPool, r: &NewReservation) -> Result<Reservation, AppError> {
        tracing::debug!(user_id = r.user_id, restaurant_id = r.restaurant_id, "add_reservation");
        let row = sqlx::query_as::<_, Reservation>("SELECT * FROM add_reservation($1, $2, $3, $4, $5, $6)")
            .bind(r.user_id)
            .bind(r.restaurant_id)
            .bind(r.date)
            .bind(r.time)
            .bind(r.party_size)
            .bind(&r.special_requests)
            .fetch_one(pool)
            .await?;
        tracing::info!(reservation_id = row.reservation_id, "reservation created");
        Ok(row)
    }

    pub async fn find(pool: &PgPool, reservation_id: i64) -> Result<Option<Reservation>, AppError> {
        let row = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE reservation_id = $1")
            .bind(reservation_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn for_user(pool: &PgPool, user_id: i64) -> Result<Vec<CustomerReservation>, AppError> {
        let rows = sqlx::query_as::<_, CustomerReservation>(
            r#"
            SELECT r.*, rest.name AS restaurant_name
            FROM reservations r
            JOIN restaurants rest ON rest.restaurant_id = r.restaurant_id
            WHERE r.user_id = $1
            ORDER BY r.reservation_date DESC, r.reservation_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Staff daily view; both filters optional.
    pub async fn for_restaurant(
        pool: &PgPool,
        restaurant_id: i64,
        date: Option<NaiveDate>,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<StaffReservation>, AppError> {
        let rows = sqlx::query_as::<_, StaffReservation>(
            r#"
            SELECT r.*,
                   u.first_name || ' ' || u.last_name AS customer_name,
                   u.phone AS customer_phone,
                   t.table_number
            FROM reservations r
            JOIN users u ON u.user_id = r.user_id
            LEFT JOIN restaurant_tables t ON t.table_id = r.table_id
            WHERE r.restaurant_id = $1
              AND ($2::DATE IS NULL OR r.reservation_date = $2)
              AND ($3::TEXT IS NULL OR r.status = $3)
            ORDER BY r.reservation_date, r.reservation_time
            "#,
        )
        .bind(restaurant_id)
        .bind(date)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn approve(pool: &PgPool, reservation_id: i64, table_id: i64) -> Result<Reservation, AppError> {
        Self::transition(pool, "approve_reservation($1, $2)", reservation_id, Some(table_id)).await
    }

    pub async fn cancel(pool: &PgPool, reservation_id: i64) -> Result<Reservation, AppError> {
        Self::transition(pool, "cancel_reservation($1)", reservation_id, None).await
    }

    pub async fn complete(pool: &PgPool, reservation_id: i64) -> Result<Reservation, AppError> {
        Self::transition(pool, "complete_reservation($1)", reservation_id, None).await
    }

    pub async fn delete(pool: &PgPool, reservation_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE reservation_id = $1")
            .bind(reservation_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn transition(
        pool: &PgPool,
        call: &'static str,
        reservation_id: i64,
        table_id: Option<i64>,
    ) -> Result<Reservation, AppError> {
        let sql = format!("SELECT * FROM {}", call);
        tracing::debug!(%call, reservation_id, ?table_id, "reservation transition");
        let mut query = sqlx::query_as::<_, Reservation>(&sql).bind(reservation_id);
        if let Some(t) = table_id {
            query = query.bind(t);
        }
        let row = query.fetch_one(pool).await?;
        tracing::info!(reservation_id, status = %row.status, "reservation status changed");
        Ok(row)
    }
}
