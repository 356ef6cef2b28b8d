//! Restaurants: listing, detail, create/update/delete, transactional registration, cuisine links, stats.

use crate::error::AppError;
use crate::model::{
    Cuisine, DiningTable, IdDiff, ImageMeta, NewRestaurant, RegisteredRestaurant, Registration, Restaurant,
    RestaurantChanges, RestaurantDetail, RestaurantSort, RestaurantStats, RestaurantSummary, IMAGE_META_COLUMNS,
};
use crate::sql::UpdateBuilder;
use sqlx::{PgConnection, PgPool};

/// Restaurant columns plus review aggregates, FROM `restaurants r`.
const SUMMARY_SELECT: &str = r#"
    SELECT r.*,
           (SELECT AVG(v.rating)::DOUBLE PRECISION FROM reviews v WHERE v.restaurant_id = r.restaurant_id) AS average_rating,
           (SELECT COUNT(*) FROM reviews v WHERE v.restaurant_id = r.restaurant_id) AS review_count
    FROM restaurants r
"#;

#[derive(Debug, Default)]
pub struct RestaurantFilter {
    pub search: Option<String>,
    pub city: Option<String>,
    pub cuisine_id: Option<i64>,
    pub sort: RestaurantSort,
}

/// `%text%` with LIKE metacharacters in `text` escaped, for `ILIKE … ESCAPE '\'`.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct RestaurantService;

impl RestaurantService {
    pub async fn list(pool: &PgPool, filter: &RestaurantFilter) -> Result<Vec<RestaurantSummary>, AppError> {
        let sql = format!(
            r#"{}
            WHERE ($1::TEXT IS NULL OR r.name ILIKE $1 ESCAPE '\' OR r.description ILIKE $1 ESCAPE '\')
              AND ($2::TEXT IS NULL OR lower(r.city) = lower($2))
              AND ($3::BIGINT IS NULL OR EXISTS (
                    SELECT 1 FROM restaurant_cuisines rc
                    WHERE rc.restaurant_id = r.restaurant_id AND rc.cuisine_id = $3))
            ORDER BY {}"#,
            SUMMARY_SELECT,
            filter.sort.order_by()
        );
        tracing::debug!(?filter, "list restaurants");
        let rows = sqlx::query_as::<_, RestaurantSummary>(&sql)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.city.as_deref())
            .bind(filter.cuisine_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(pool: &PgPool, restaurant_id: i64) -> Result<Option<RestaurantDetail>, AppError> {
        let sql = format!("{} WHERE r.restaurant_id = $1", SUMMARY_SELECT);
        let summary = sqlx::query_as::<_, RestaurantSummary>(&sql)
            .bind(restaurant_id)
            .fetch_optional(pool)
            .await?;
        let Some(summary) = summary else {
            return Ok(None);
        };
        let cuisines = Self::cuisines(pool, restaurant_id).await?;
        Ok(Some(RestaurantDetail { summary, cuisines }))
    }

    /// Insert the restaurant and, when `admin_id` is set, its admin link in one transaction.
    pub async fn create(pool: &PgPool, restaurant: &NewRestaurant) -> Result<Restaurant, AppError> {
        let mut tx = pool.begin().await?;
        let created = insert_restaurant(&mut tx, restaurant).await?;
        tx.commit().await?;
        tracing::info!(restaurant_id = created.restaurant_id, "restaurant created");
        Ok(created)
    }

    /// Restaurant, admin link, cuisines, tables and images in a single transaction; any failure rolls back all of it.
    pub async fn register(pool: &PgPool, registration: Registration) -> Result<RegisteredRestaurant, AppError> {
        let mut tx = pool.begin().await?;
        let restaurant = insert_restaurant(&mut tx, &registration.restaurant).await?;
        let restaurant_id = restaurant.restaurant_id;

        if !registration.cuisine_ids.is_empty() {
            sqlx::query(
                "INSERT INTO restaurant_cuisines (restaurant_id, cuisine_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            )
            .bind(restaurant_id)
            .bind(&registration.cuisine_ids)
            .execute(&mut *tx)
            .await?;
        }

        let mut tables = Vec::with_capacity(registration.tables.len());
        for (table_number, capacity) in &registration.tables {
            let table = sqlx::query_as::<_, DiningTable>(
                "INSERT INTO restaurant_tables (restaurant_id, table_number, capacity) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(restaurant_id)
            .bind(table_number)
            .bind(capacity)
            .fetch_one(&mut *tx)
            .await?;
            tables.push(table);
        }

        let sql = format!(
            "INSERT INTO restaurant_images (restaurant_id, file_name, content_type, image) VALUES ($1, $2, $3, $4) RETURNING {}",
            IMAGE_META_COLUMNS
        );
        let mut images = Vec::with_capacity(registration.images.len());
        for image in registration.images {
            let meta = sqlx::query_as::<_, ImageMeta>(&sql)
                .bind(restaurant_id)
                .bind(image.file_name)
                .bind(image.content_type)
                .bind(image.bytes)
                .fetch_one(&mut *tx)
                .await?;
            images.push(meta);
        }

        tx.commit().await?;
        tracing::info!(
            restaurant_id,
            cuisines = registration.cuisine_ids.len(),
            tables = tables.len(),
            images = images.len(),
            "restaurant registered"
        );
        Ok(RegisteredRestaurant {
            restaurant,
            cuisine_ids: registration.cuisine_ids,
            tables,
            images,
        })
    }

    pub async fn update(
        pool: &PgPool,
        restaurant_id: i64,
        changes: RestaurantChanges,
    ) -> Result<Option<Restaurant>, AppError> {
        let builder = UpdateBuilder::new("restaurants")
            .set("name", changes.name)
            .set("address", changes.address)
            .set("city", changes.city)
            .set("phone", changes.phone)
            .set("email", changes.email)
            .set("description", changes.description)
            .set("opening_time", changes.opening_time)
            .set("closing_time", changes.closing_time)
            .set("price_range", changes.price_range);
        if builder.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        let q = builder.build("restaurant_id", restaurant_id, "*");
        tracing::debug!(sql = %q.sql, "update restaurant");
        let mut query = sqlx::query_as::<_, Restaurant>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_optional(pool).await?)
    }

    pub async fn delete(pool: &PgPool, restaurant_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE restaurant_id = $1")
            .bind(restaurant_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn stats(pool: &PgPool, restaurant_id: i64) -> Result<RestaurantStats, AppError> {
        tracing::debug!(restaurant_id, "get_restaurant_stats");
        let stats = sqlx::query_as::<_, RestaurantStats>("SELECT * FROM get_restaurant_stats($1)")
            .bind(restaurant_id)
            .fetch_one(pool)
            .await?;
        Ok(stats)
    }

    pub async fn cuisines(pool: &PgPool, restaurant_id: i64) -> Result<Vec<Cuisine>, AppError> {
        let rows = sqlx::query_as::<_, Cuisine>(
            r#"
            SELECT c.* FROM cuisines c
            JOIN restaurant_cuisines rc ON rc.cuisine_id = c.cuisine_id
            WHERE rc.restaurant_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Apply the client's add/remove diff in one transaction and return the resulting cuisine list.
    pub async fn apply_cuisine_diff(pool: &PgPool, restaurant_id: i64, diff: &IdDiff) -> Result<Vec<Cuisine>, AppError> {
        let mut tx = pool.begin().await?;
        if !diff.remove.is_empty() {
            sqlx::query("DELETE FROM restaurant_cuisines WHERE restaurant_id = $1 AND cuisine_id = ANY($2::BIGINT[])")
                .bind(restaurant_id)
                .bind(&diff.remove)
                .execute(&mut *tx)
                .await?;
        }
        if !diff.add.is_empty() {
            sqlx::query(
                "INSERT INTO restaurant_cuisines (restaurant_id, cuisine_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            )
            .bind(restaurant_id)
            .bind(&diff.add)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::info!(restaurant_id, added = diff.add.len(), removed = diff.remove.len(), "restaurant cuisines updated");
        Self::cuisines(pool, restaurant_id).await
    }
}

async fn insert_restaurant(conn: &mut PgConnection, r: &NewRestaurant) -> Result<Restaurant, AppError> {
    let created = sqlx::query_as::<_, Restaurant>(
        r#"
        INSERT INTO restaurants (name, address, city, phone, email, description, opening_time, closing_time, price_range)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&r.name)
    .bind(&r.address)
    .bind(&r.city)
    .bind(&r.phone)
    .bind(&r.email)
    .bind(&r.description)
    .bind(r.opening_time)
    .bind(r.closing_time)
    .bind(&r.price_range)
    .fetch_one(&mut *conn)
    .await?;
    if let Some(admin_id) = r.admin_id {
        sqlx::query("INSERT INTO restaurant_admins (restaurant_id, user_id) VALUES ($1, $2)")
            .bind(created.restaurant_id)
            .bind(admin_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn search_pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("pizza"), "%pizza%");
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern("_"), r"%\_%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
