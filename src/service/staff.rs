//! Restaurant staff and admin membership.

use crate::error::AppError;
use crate::model::{AdminMember, StaffMember};
use sqlx::PgPool;

pub struct StaffService;

impl StaffService {
    pub async fn list(pool: &PgPool, restaurant_id: i64) -> Result<Vec<StaffMember>, AppError> {
        let rows = sqlx::query_as::<_, StaffMember>(
            r#"
            SELECT s.restaurant_id, u.user_id, u.username, u.first_name, u.last_name, u.email, s.position, s.hired_at
            FROM restaurant_staff s
            JOIN users u ON u.user_id = s.user_id
            WHERE s.restaurant_id = $1
            ORDER BY u.last_name, u.first_name
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Add or re-position a staff member (upsert on the membership key).
    pub async fn add(
        pool: &PgPool,
        restaurant_id: i64,
        user_id: i64,
        position: Option<&str>,
    ) -> Result<StaffMember, AppError> {
        let row = sqlx::query_as::<_, StaffMember>(
            r#"
            WITH s AS (
                INSERT INTO restaurant_staff (restaurant_id, user_id, position)
                VALUES ($1, $2, $3)
                ON CONFLICT (restaurant_id, user_id) DO UPDATE SET position = EXCLUDED.position
                RETURNING restaurant_id, user_id, position, hired_at
            )
            SELECT s.restaurant_id, u.user_id, u.username, u.first_name, u.last_name, u.email, s.position, s.hired_at
            FROM s JOIN users u ON u.user_id = s.user_id
            "#,
        )
        .bind(restaurant_id)
        .bind(user_id)
        .bind(position)
        .fetch_one(pool)
        .await?;
        tracing::info!(restaurant_id, user_id, "staff member added");
        Ok(row)
    }

    pub async fn remove(pool: &PgPool, restaurant_id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM restaurant_staff WHERE restaurant_id = $1 AND user_id = $2")
            .bind(restaurant_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn admins(pool: &PgPool, restaurant_id: i64) -> Result<Vec<AdminMember>, AppError> {
        let rows = sqlx::query_as::<_, AdminMember>(
            r#"
            SELECT a.restaurant_id, u.user_id, u.username, u.first_name, u.last_name, u.email
            FROM restaurant_admins a
            JOIN users u ON u.user_id = a.user_id
            WHERE a.restaurant_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// `Ok(None)` when the user does not exist; re-adding an existing admin is a no-op.
    pub async fn add_admin(pool: &PgPool, restaurant_id: i64, user_id: i64) -> Result<Option<AdminMember>, AppError> {
        let mut tx = pool.begin().await?;
        let admin = sqlx::query_as::<_, AdminMember>(
            r#"
            SELECT $1::BIGINT AS restaurant_id, u.user_id, u.username, u.first_name, u.last_name, u.email
            FROM users u WHERE u.user_id = $2
            "#,
        )
        .bind(restaurant_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(admin) = admin else {
            return Ok(None);
        };
        sqlx::query("INSERT INTO restaurant_admins (restaurant_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(restaurant_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(restaurant_id, user_id, "admin added");
        Ok(Some(admin))
    }
}
