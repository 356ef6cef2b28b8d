use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantReview {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub username: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserReview {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub restaurant_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    pub user_id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}
