use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuisinePreferenceBody {
    pub cuisine_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPreferenceBody {
    pub restaurant_id: Option<i64>,
}
