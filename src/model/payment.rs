use super::status::PaymentStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: i64,
    pub reservation_id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub payment_method: String,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBody {
    pub reservation_id: Option<i64>,
    pub user_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug)]
pub struct NewPayment {
    pub reservation_id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub payment_method: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusBody {
    pub status: Option<String>,
}
