use super::status::TableStatus;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub table_id: i64,
    pub restaurant_id: i64,
    pub table_number: i32,
    pub capacity: i32,
    #[sqlx(try_from = "String")]
    pub status: TableStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTable {
    pub restaurant_id: Option<i64>,
    pub table_number: Option<i32>,
    pub capacity: Option<i32>,
}

/// Table spec inside a restaurant registration; the restaurant id comes from the new row.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    pub table_number: Option<i32>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTable {
    pub table_number: Option<i32>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct TableStatusBody {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTablesQuery {
    pub restaurant_id: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub party_size: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAvailability {
    pub table_id: i64,
    pub available: bool,
}
