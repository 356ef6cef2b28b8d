use crate::error::AppError;
use crate::model::{RestaurantReview, Review, UserReview};
use crate::sql::UpdateBuilder;
use sqlx::PgPool;

pub struct ReviewService;

impl ReviewService {
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        restaurant_id: i64,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, AppError> {
        let row = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, restaurant_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(restaurant_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(pool)
        .await?;
        tracing::info!(review_id = row.review_id, restaurant_id, rating, "review added");
        Ok(row)
    }

    pub async fn for_restaurant(pool: &PgPool, restaurant_id: i64) -> Result<Vec<RestaurantReview>, AppError> {
        let rows = sqlx::query_as::<_, RestaurantReview>(
            r#"
            SELECT v.*, u.username
            FROM reviews v
            JOIN users u ON u.user_id = v.user_id
            WHERE v.restaurant_id = $1
            ORDER BY v.created_at DESC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn for_user(pool: &PgPool, user_id: i64) -> Result<Vec<UserReview>, AppError> {
        let rows = sqlx::query_as::<_, UserReview>(
            r#"
            SELECT v.*, r.name AS restaurant_name
            FROM reviews v
            JOIN restaurants r ON r.restaurant_id = v.restaurant_id
            WHERE v.user_id = $1
            ORDER BY v.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn update(
        pool: &PgPool,
        review_id: i64,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Result<Option<Review>, AppError> {
        let builder = UpdateBuilder::new("reviews")
            .set("rating", rating)
            .set("comment", comment);
        if builder.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        let q = builder.build("review_id", review_id, "*");
        let mut query = sqlx::query_as::<_, Review>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_optional(pool).await?)
    }

    pub async fn delete(pool: &PgPool, review_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
