//! Dining tables and the availability routines.

use crate::error::AppError;
use crate::model::{DiningTable, TableStatus};
use crate::sql::UpdateBuilder;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

pub struct TableService;

impl TableService {
    pub async fn list_for_restaurant(pool: &PgPool, restaurant_id: i64) -> Result<Vec<DiningTable>, AppError> {
        let rows = sqlx::query_as::<_, DiningTable>(
            "SELECT * FROM restaurant_tables WHERE restaurant_id = $1 ORDER BY table_number",
        )
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn find(pool: &PgPool, table_id: i64) -> Result<Option<DiningTable>, AppError> {
        let row = sqlx::query_as::<_, DiningTable>("SELECT * FROM restaurant_tables WHERE table_id = $1")
            .bind(table_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(
        pool: &PgPool,
        restaurant_id: i64,
        table_number: i32,
        capacity: i32,
    ) -> Result<DiningTable, AppError> {
        let row = sqlx::query_as::<_, DiningTable>(
            "INSERT INTO restaurant_tables (restaurant_id, table_number, capacity) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(restaurant_id)
        .bind(table_number)
        .bind(capacity)
        .fetch_one(pool)
        .await?;
        tracing::info!(table_id = row.table_id, restaurant_id, table_number, "table added");
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        table_id: i64,
        table_number: Option<i32>,
        capacity: Option<i32>,
    ) -> Result<Option<DiningTable>, AppError> {
        let builder = UpdateBuilder::new("restaurant_tables")
            .set("table_number", table_number)
            .set("capacity", capacity);
        if builder.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        let q = builder.build("table_id", table_id, "*");
        let mut query = sqlx::query_as::<_, DiningTable>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_optional(pool).await?)
    }

    pub async fn set_status(pool: &PgPool, table_id: i64, status: TableStatus) -> Result<Option<DiningTable>, AppError> {
        let row = sqlx::query_as::<_, DiningTable>(
            "UPDATE restaurant_tables SET status = $1 WHERE table_id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(table_id)
        .fetch_optional(pool)
        .await?;
        if let Some(t) = &row {
            tracing::info!(table_id, status = %t.status, "table status changed");
        }
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, table_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM restaurant_tables WHERE table_id = $1")
            .bind(table_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `get_available_tables`: tables that seat the party and have no overlapping booking.
    pub async fn available(
        pool: &PgPool,
        restaurant_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        party_size: i32,
    ) -> Result<Vec<DiningTable>, AppError> {
        tracing::debug!(restaurant_id, %date, %time, party_size, "get_available_tables");
        let rows = sqlx::query_as::<_, DiningTable>("SELECT * FROM get_available_tables($1, $2, $3, $4)")
            .bind(restaurant_id)
            .bind(date)
            .bind(time)
            .bind(party_size)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// `check_table_availability` for one table and slot. `None` when the table does not exist.
    pub async fn is_available(
        pool: &PgPool,
        table_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<bool>, AppError> {
        tracing::debug!(table_id, %date, %time, "check_table_availability");
        let row: Option<(bool,)> = sqlx::query_as(
            "SELECT check_table_availability(table_id, $2, $3) FROM restaurant_tables WHERE table_id = $1",
        )
        .bind(table_id)
        .bind(date)
        .bind(time)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(available,)| available))
    }
}
