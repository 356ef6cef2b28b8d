//! Restaurant images: byte buffers stored as-is in `restaurant_images.image`.

use crate::error::AppError;
use crate::model::{ImageData, ImageMeta, NewImage, IMAGE_META_COLUMNS};
use sqlx::PgPool;

pub struct ImageService;

impl ImageService {
    pub async fn list(pool: &PgPool, restaurant_id: i64) -> Result<Vec<ImageMeta>, AppError> {
        let sql = format!(
            "SELECT {} FROM restaurant_images WHERE restaurant_id = $1 ORDER BY image_id",
            IMAGE_META_COLUMNS
        );
        let rows = sqlx::query_as::<_, ImageMeta>(&sql)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Store every uploaded file; all or none.
    pub async fn add(pool: &PgPool, restaurant_id: i64, images: Vec<NewImage>) -> Result<Vec<ImageMeta>, AppError> {
        let sql = format!(
            "INSERT INTO restaurant_images (restaurant_id, file_name, content_type, image) VALUES ($1, $2, $3, $4) RETURNING {}",
            IMAGE_META_COLUMNS
        );
        let mut tx = pool.begin().await?;
        let mut out = Vec::with_capacity(images.len());
        for image in images {
            tracing::debug!(restaurant_id, file = %image.file_name, bytes = image.bytes.len(), "insert image");
            let meta = sqlx::query_as::<_, ImageMeta>(&sql)
                .bind(restaurant_id)
                .bind(image.file_name)
                .bind(image.content_type)
                .bind(image.bytes)
                .fetch_one(&mut *tx)
                .await?;
            out.push(meta);
        }
        tx.commit().await?;
        Ok(out)
    }

    pub async fn data(pool: &PgPool, image_id: i64) -> Result<Option<ImageData>, AppError> {
        let row = sqlx::query_as::<_, ImageData>(
            "SELECT content_type, image FROM restaurant_images WHERE image_id = $1",
        )
        .bind(image_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, image_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM restaurant_images WHERE image_id = $1")
            .bind(image_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
