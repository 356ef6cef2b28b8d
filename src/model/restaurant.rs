use super::cuisine::Cuisine;
use super::table::{DiningTable, TableSpec};
use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub restaurant_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub price_range: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing row: restaurant plus review aggregates.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub summary: RestaurantSummary,
    pub cuisines: Vec<Cuisine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBody {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub price_range: Option<String>,
    /// Links the creating user as restaurant admin.
    pub admin_id: Option<i64>,
}

/// Validated create data.
#[derive(Clone, Debug)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub price_range: Option<String>,
    pub admin_id: Option<i64>,
}

/// Validated partial update; `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub price_range: Option<String>,
}

/// `restaurant` part of the registration multipart form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationBody {
    #[serde(flatten)]
    pub restaurant: RestaurantBody,
    #[serde(default)]
    pub cuisine_ids: Vec<i64>,
    #[serde(default)]
    pub tables: Vec<TableSpec>,
}

#[derive(Debug)]
pub struct NewImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Validated registration: everything inserted in one transaction.
#[derive(Debug)]
pub struct Registration {
    pub restaurant: NewRestaurant,
    pub cuisine_ids: Vec<i64>,
    /// (table_number, capacity)
    pub tables: Vec<(i32, i32)>,
    pub images: Vec<NewImage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub cuisine_ids: Vec<i64>,
    pub tables: Vec<DiningTable>,
    pub images: Vec<ImageMeta>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub cuisine_id: Option<i64>,
    pub sort: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RestaurantSort {
    #[default]
    Name,
    Rating,
    Newest,
}

impl RestaurantSort {
    pub fn parse(s: Option<&str>) -> Option<Self> {
        match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("name") => Some(RestaurantSort::Name),
            Some("rating") => Some(RestaurantSort::Rating),
            Some("newest") => Some(RestaurantSort::Newest),
            _ => None,
        }
    }

    pub fn order_by(&self) -> &'static str {
        match self {
            RestaurantSort::Name => "r.name, r.restaurant_id",
            RestaurantSort::Rating => "average_rating DESC NULLS LAST, review_count DESC, r.name",
            RestaurantSort::Newest => "r.created_at DESC, r.restaurant_id DESC",
        }
    }
}

/// Add/remove id diff from the client's edit screen.
#[derive(Debug, Default, Deserialize)]
pub struct IdDiff {
    #[serde(default)]
    pub add: Vec<i64>,
    #[serde(default)]
    pub remove: Vec<i64>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantStats {
    pub restaurant_id: i64,
    pub total_reservations: i64,
    pub pending_reservations: i64,
    pub approved_reservations: i64,
    pub completed_reservations: i64,
    pub cancelled_reservations: i64,
    pub total_revenue: Decimal,
    pub average_rating: Option<f64>,
    pub review_count: i64,
    pub table_count: i64,
}

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    pub image_id: i64,
    pub restaurant_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

pub const IMAGE_META_COLUMNS: &str =
    "image_id, restaurant_id, file_name, content_type, octet_length(image)::BIGINT AS size, uploaded_at";

#[derive(Debug, sqlx::FromRow)]
pub struct ImageData {
    pub content_type: String,
    pub image: Vec<u8>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub restaurant_id: i64,
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub hired_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminMember {
    pub restaurant_id: i64,
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    pub user_id: Option<i64>,
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parsing() {
        assert_eq!(RestaurantSort::parse(None), Some(RestaurantSort::Name));
        assert_eq!(RestaurantSort::parse(Some("Rating")), Some(RestaurantSort::Rating));
        assert_eq!(RestaurantSort::parse(Some("newest")), Some(RestaurantSort::Newest));
        assert_eq!(RestaurantSort::parse(Some("price")), None);
    }

    #[test]
    fn registration_body_defaults_lists() {
        let body: RegistrationBody = serde_json::from_value(serde_json::json!({
            "name": "Trattoria",
            "address": "1 Main St",
            "city": "Rome",
            "adminId": 4
        }))
        .unwrap();
        assert_eq!(body.restaurant.name.as_deref(), Some("Trattoria"));
        assert_eq!(body.restaurant.admin_id, Some(4));
        assert!(body.cuisine_ids.is_empty());
        assert!(body.tables.is_empty());
    }
}
