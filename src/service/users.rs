//! Users: registration, login, profile, profile picture.

use crate::error::AppError;
use crate::model::{Credentials, LoginResponse, NewUser, ProfilePic, Restaurant, UpdateUser, User, USER_COLUMNS};
use crate::service::password::{hash_password, verify_password};
use crate::sql::UpdateBuilder;
use sqlx::PgPool;

pub struct UserService;

impl UserService {
    pub async fn create(pool: &PgPool, user: &NewUser, pic: Option<ProfilePic>) -> Result<User, AppError> {
        let password_hash = hash_password(&user.password)?;
        let (pic_type, pic_bytes) = match pic {
            Some(p) => (Some(p.content_type), Some(p.bytes)),
            None => (None, None),
        };
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, phone, role, profile_pic, profile_pic_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(username = %user.username, "insert user");
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .bind(user.role.as_str())
            .bind(pic_bytes)
            .bind(pic_type)
            .fetch_one(pool)
            .await?;
        tracing::info!(user_id = created.user_id, role = %created.role, "user registered");
        Ok(created)
    }

    /// `None` for unknown username or wrong password; the caller cannot tell which.
    pub async fn login(pool: &PgPool, username: &str, password: &str) -> Result<Option<LoginResponse>, AppError> {
        let creds = sqlx::query_as::<_, Credentials>(
            "SELECT user_id, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;
        let Some(creds) = creds else {
            return Ok(None);
        };
        if !verify_password(password, &creds.password_hash)? {
            return Ok(None);
        }
        let Some(user) = Self::find(pool, creds.user_id).await? else {
            return Ok(None);
        };
        let restaurant_ids = Self::restaurant_ids(pool, user.user_id).await?;
        Ok(Some(LoginResponse { user, restaurant_ids }))
    }

    pub async fn find(pool: &PgPool, user_id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE user_id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn update(pool: &PgPool, user_id: i64, changes: UpdateUser) -> Result<Option<User>, AppError> {
        let builder = UpdateBuilder::new("users")
            .set("email", changes.email)
            .set("first_name", changes.first_name)
            .set("last_name", changes.last_name)
            .set("phone", changes.phone);
        if builder.is_empty() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        let q = builder.build("user_id", user_id, USER_COLUMNS);
        tracing::debug!(sql = %q.sql, "update user");
        let mut query = sqlx::query_as::<_, User>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_optional(pool).await?)
    }

    /// `Ok(None)` when the user does not exist, `Ok(Some(false))` when the current password is wrong.
    pub async fn change_password(
        pool: &PgPool,
        user_id: i64,
        current: &str,
        new: &str,
    ) -> Result<Option<bool>, AppError> {
        let creds = sqlx::query_as::<_, Credentials>(
            "SELECT user_id, password_hash FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        let Some(creds) = creds else {
            return Ok(None);
        };
        if !verify_password(current, &creds.password_hash)? {
            return Ok(Some(false));
        }
        let hash = hash_password(new)?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE user_id = $2")
            .bind(hash)
            .bind(user_id)
            .execute(pool)
            .await?;
        tracing::info!(user_id, "password changed");
        Ok(Some(true))
    }

    pub async fn set_profile_pic(pool: &PgPool, user_id: i64, pic: ProfilePic) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET profile_pic = $1, profile_pic_type = $2 WHERE user_id = $3 RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(pic.bytes)
            .bind(pic.content_type)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn profile_pic(pool: &PgPool, user_id: i64) -> Result<Option<ProfilePic>, AppError> {
        let row: Option<(Vec<u8>, Option<String>)> = sqlx::query_as(
            "SELECT profile_pic, profile_pic_type FROM users WHERE user_id = $1 AND profile_pic IS NOT NULL",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(bytes, content_type)| ProfilePic {
            content_type: content_type.unwrap_or_else(|| "application/octet-stream".into()),
            bytes,
        }))
    }

    pub async fn delete(pool: &PgPool, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restaurants the user administers or works at.
    pub async fn restaurants(pool: &PgPool, user_id: i64) -> Result<Vec<Restaurant>, AppError> {
        let rows = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT r.* FROM restaurants r
            WHERE r.restaurant_id IN (
                SELECT restaurant_id FROM restaurant_admins WHERE user_id = $1
                UNION
                SELECT restaurant_id FROM restaurant_staff WHERE user_id = $1
            )
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn restaurant_ids(pool: &PgPool, user_id: i64) -> Result<Vec<i64>, AppError> {
        let ids: Vec<(i64,)> = sqlx::query_as(
            r#"
            SELECT restaurant_id FROM restaurant_admins WHERE user_id = $1
            UNION
            SELECT restaurant_id FROM restaurant_staff WHERE user_id = $1
            ORDER BY restaurant_id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}
