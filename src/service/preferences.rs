//! User preferences: favourite cuisines and restaurants, and the personalized listing built on them.

use crate::error::AppError;
use crate::model::{Cuisine, RestaurantSummary};
use sqlx::PgPool;

pub struct PreferenceService;

impl PreferenceService {
    pub async fn cuisines(pool: &PgPool, user_id: i64) -> Result<Vec<Cuisine>, AppError> {
        let rows = sqlx::query_as::<_, Cuisine>(
            r#"
            SELECT c.* FROM cuisines c
            JOIN user_cuisine_preferences p ON p.cuisine_id = c.cuisine_id
            WHERE p.user_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Idempotent: adding an existing preference is not an error.
    pub async fn add_cuisine(pool: &PgPool, user_id: i64, cuisine_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_cuisine_preferences (user_id, cuisine_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(cuisine_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn remove_cuisine(pool: &PgPool, user_id: i64, cuisine_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_cuisine_preferences WHERE user_id = $1 AND cuisine_id = $2")
            .bind(user_id)
            .bind(cuisine_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn restaurants(pool: &PgPool, user_id: i64) -> Result<Vec<RestaurantSummary>, AppError> {
        let rows = sqlx::query_as::<_, RestaurantSummary>(
            r#"
            SELECT r.*,
                   (SELECT AVG(v.rating)::DOUBLE PRECISION FROM reviews v WHERE v.restaurant_id = r.restaurant_id) AS average_rating,
                   (SELECT COUNT(*) FROM reviews v WHERE v.restaurant_id = r.restaurant_id) AS review_count
            FROM restaurants r
            JOIN user_restaurant_preferences p ON p.restaurant_id = r.restaurant_id
            WHERE p.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn add_restaurant(pool: &PgPool, user_id: i64, restaurant_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_restaurant_preferences (user_id, restaurant_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn remove_restaurant(pool: &PgPool, user_id: i64, restaurant_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_restaurant_preferences WHERE user_id = $1 AND restaurant_id = $2")
            .bind(user_id)
            .bind(restaurant_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restaurants serving any preferred cuisine, best rated first.
    pub async fn recommendations(pool: &PgPool, user_id: i64) -> Result<Vec<RestaurantSummary>, AppError> {
        let rows = sqlx::query_as::<_, RestaurantSummary>(
            r#"
            SELECT r.*,
                   (SELECT AVG(v.rating)::DOUBLE PRECISION FROM reviews v WHERE v.restaurant_id = r.restaurant_id) AS average_rating,
                   (SELECT COUNT(*) FROM reviews v WHERE v.restaurant_id = r.restaurant_id) AS review_count
            FROM restaurants r
            WHERE EXISTS (
                SELECT 1 FROM restaurant_cuisines rc
                JOIN user_cuisine_preferences p ON p.cuisine_id = rc.cuisine_id
                WHERE rc.restaurant_id = r.restaurant_id AND p.user_id = $1
            )
            ORDER BY average_rating DESC NULLS LAST, review_count DESC, r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
