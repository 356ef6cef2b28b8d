use crate::error::AppError;
use crate::model::Cuisine;
use crate::sql::UpdateBuilder;
use sqlx::PgPool;

pub struct CuisineService;

impl CuisineService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Cuisine>, AppError> {
        let rows = sqlx::query_as::<_, Cuisine>("SELECT * FROM cuisines ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(pool: &PgPool, cuisine_id: i64) -> Result<Option<Cuisine>, AppError> {
        let row = sqlx::query_as::<_, Cuisine>("SELECT * FROM cuisines WHERE cuisine_id = $1")
            .bind(cuisine_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(pool: &PgPool, name: &str, description: Option<&str>) -> Result<Cuisine, AppError> {
        let row = sqlx::query_as::<_, Cuisine>(
            "INSERT INTO cuisines (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await?;
        tracing::info!(cuisine_id = row.cuisine_id, name, "cuisine added");
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        cuisine_id: i64,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Cuisine>, AppError> {
        let builder = UpdateBuilder::new("cuisines")
            .set("name", name)
            .set("description", description);
        if builder.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        let q = builder.build("cuisine_id", cuisine_id, "*");
        let mut query = sqlx::query_as::<_, Cuisine>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_optional(pool).await?)
    }

    pub async fn delete(pool: &PgPool, cuisine_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cuisines WHERE cuisine_id = $1")
            .bind(cuisine_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
