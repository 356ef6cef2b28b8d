use super::status::ReservationStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub table_id: Option<i64>,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub party_size: i32,
    pub special_requests: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Customer view: reservation with the restaurant's name.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReservation {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub reservation: Reservation,
    pub restaurant_name: String,
}

/// Staff view: reservation with customer contact and assigned table number.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StaffReservation {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub reservation: Reservation,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub table_number: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationBody {
    pub restaurant_id: Option<i64>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub party_size: Option<i32>,
    pub special_requests: Option<String>,
}

#[derive(Debug)]
pub struct NewReservation {
    pub user_id: i64,
    pub restaurant_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBody {
    pub table_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DailyQuery {
    pub date: Option<String>,
    pub status: Option<String>,
}
