use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cuisine {
    pub cuisine_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CuisineBody {
    pub name: Option<String>,
    pub description: Option<String>,
}
