use super::status::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public user record; never carries the password hash or picture bytes.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub has_profile_pic: bool,
    pub created_at: DateTime<Utc>,
}

/// Column list matching [`User`].
pub const USER_COLUMNS: &str = "user_id, username, email, first_name, last_name, phone, role, \
     (profile_pic IS NOT NULL) AS has_profile_pic, created_at";

#[derive(Debug, sqlx::FromRow)]
pub struct Credentials {
    pub user_id: i64,
    pub password_hash: String,
}

/// Validated registration data (built from multipart text fields).
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login result: the user plus the restaurants they run, which the client keeps as session context.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub restaurant_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct ProfilePic {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
