//! Restaurant handlers: listing, detail, create, transactional registration, update, delete, stats, cuisine links.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, SessionContext};
use crate::handlers::upload::read_form;
use crate::model::{
    IdDiff, NewRestaurant, RegistrationBody, Registration, RestaurantBody, RestaurantChanges, RestaurantQuery,
    RestaurantSort, TableSpec,
};
use crate::response::{self, ok, ok_message};
use crate::service::validation::{self as v, MAX_NAME_LEN, MAX_TEXT_LEN};
use crate::service::{RestaurantFilter, RestaurantService};
use crate::state::AppState;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::response::IntoResponse;
use std::collections::HashSet;

const RESTAURANT_PART: &str = "restaurant";
const IMAGE_PART: &str = "image";
const MAX_PRICE_RANGE_LEN: usize = 10;

fn checked_contact(phone: &Option<String>, email: &Option<String>) -> Result<(), AppError> {
    if let Some(p) = phone {
        v::phone("phone", p)?;
    }
    if let Some(e) = email {
        v::email("email", e)?;
    }
    Ok(())
}

fn new_restaurant(body: RestaurantBody) -> Result<NewRestaurant, AppError> {
    let restaurant = NewRestaurant {
        name: v::required_text("name", body.name, MAX_NAME_LEN)?,
        address: v::required_text("address", body.address, MAX_TEXT_LEN)?,
        city: v::required_text("city", body.city, MAX_NAME_LEN)?,
        phone: v::optional_text("phone", body.phone, MAX_NAME_LEN)?,
        email: v::optional_text("email", body.email, MAX_NAME_LEN)?,
        description: v::optional_text("description", body.description, MAX_TEXT_LEN)?,
        opening_time: v::optional_time("openingTime", body.opening_time)?,
        closing_time: v::optional_time("closingTime", body.closing_time)?,
        price_range: v::optional_text("priceRange", body.price_range, MAX_PRICE_RANGE_LEN)?,
        admin_id: body.admin_id,
    };
    checked_contact(&restaurant.phone, &restaurant.email)?;
    if let Some(id) = restaurant.admin_id {
        v::positive("adminId", id)?;
    }
    Ok(restaurant)
}

fn changes(body: RestaurantBody) -> Result<RestaurantChanges, AppError> {
    let changes = RestaurantChanges {
        name: v::optional_text("name", body.name, MAX_NAME_LEN)?,
        address: v::optional_text("address", body.address, MAX_TEXT_LEN)?,
        city: v::optional_text("city", body.city, MAX_NAME_LEN)?,
        phone: v::optional_text("phone", body.phone, MAX_NAME_LEN)?,
        email: v::optional_text("email", body.email, MAX_NAME_LEN)?,
        description: v::optional_text("description", body.description, MAX_TEXT_LEN)?,
        opening_time: v::optional_time("openingTime", body.opening_time)?,
        closing_time: v::optional_time("closingTime", body.closing_time)?,
        price_range: v::optional_text("priceRange", body.price_range, MAX_PRICE_RANGE_LEN)?,
    };
    checked_contact(&changes.phone, &changes.email)?;
    Ok(changes)
}

/// Table numbers must be positive and unique within the registration.
fn table_specs(specs: Vec<TableSpec>) -> Result<Vec<(i32, i32)>, AppError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(specs.len());
    for spec in specs {
        let number = v::required("tableNumber", spec.table_number)?;
        let capacity = v::required("capacity", spec.capacity)?;
        v::positive("tableNumber", number.into())?;
        v::positive("capacity", capacity.into())?;
        if !seen.insert(number) {
            return Err(AppError::Validation(format!("Duplicate table number {}", number)));
        }
        out.push((number, capacity));
    }
    Ok(out)
}

pub async fn list_restaurants(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<RestaurantQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sort = RestaurantSort::parse(q.sort.as_deref())
        .ok_or_else(|| AppError::Validation("sort must be one of: name, rating, newest".into()))?;
    let filter = RestaurantFilter {
        search: v::optional_text("search", q.search, MAX_NAME_LEN)?,
        city: v::optional_text("city", q.city, MAX_NAME_LEN)?,
        cuisine_id: q.cuisine_id,
        sort,
    };
    let rows = RestaurantService::list(&state.pool, &filter).await?;
    response::many(rows, "restaurants")
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = RestaurantService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".into()))?;
    Ok(ok("Restaurant retrieved successfully", detail))
}

/// GET /api/restaurants/mine: the restaurant named by `X-Restaurant-Id`.
pub async fn my_restaurant(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, AppError> {
    let id = session.restaurant_id()?;
    let detail = RestaurantService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".into()))?;
    Ok(ok("Restaurant retrieved successfully", detail))
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RestaurantBody>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = new_restaurant(body)?;
    let created = RestaurantService::create(&state.pool, &restaurant).await?;
    Ok(response::created("Restaurant added successfully", created))
}

/// POST /api/restaurants/register: `restaurant` JSON part plus any number of `image` files, stored atomically.
pub async fn register_restaurant(
    State(state): State<AppState>,
    session: SessionContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;
    // Browsers append JSON as a Blob, which arrives as a file part.
    let raw = match form.take_text(RESTAURANT_PART) {
        Some(text) => text.into_bytes(),
        None => form
            .take_file(RESTAURANT_PART)
            .map(|f| f.bytes)
            .ok_or_else(|| AppError::Validation(format!("{} is required", RESTAURANT_PART)))?,
    };
    let mut body: RegistrationBody = serde_json::from_slice(&raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} part: {}", RESTAURANT_PART, e)))?;
    if body.restaurant.admin_id.is_none() {
        body.restaurant.admin_id = session.user_id;
    }
    let restaurant = new_restaurant(body.restaurant)?;
    for id in &body.cuisine_ids {
        v::positive("cuisineIds", *id)?;
    }
    let tables = table_specs(body.tables)?;
    let images = form
        .take_files(IMAGE_PART)
        .into_iter()
        .map(|f| f.into_image())
        .collect::<Result<Vec<_>, _>>()?;

    let mut cuisine_ids = body.cuisine_ids;
    cuisine_ids.sort_unstable();
    cuisine_ids.dedup();
    let registered = RestaurantService::register(
        &state.pool,
        Registration {
            restaurant,
            cuisine_ids,
            tables,
            images,
        },
    )
    .await?;
    Ok(response::created("Restaurant registered successfully", registered))
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<RestaurantBody>,
) -> Result<impl IntoResponse, AppError> {
    let changes = changes(body)?;
    let updated = RestaurantService::update(&state.pool, id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".into()))?;
    Ok(ok("Restaurant updated successfully", updated))
}

pub async fn delete_restaurant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !RestaurantService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Restaurant not found".into()));
    }
    tracing::info!(restaurant_id = id, "restaurant deleted");
    Ok(ok_message("Restaurant deleted successfully"))
}

pub async fn restaurant_stats(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let stats = RestaurantService::stats(&state.pool, id).await?;
    Ok(ok("Restaurant statistics retrieved successfully", stats))
}

pub async fn restaurant_cuisines(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = RestaurantService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".into()))?;
    response::many(detail.cuisines, "cuisines")
}

/// PUT /api/restaurants/:id/cuisines `{add, remove}`; an id in both lists is rejected.
pub async fn update_restaurant_cuisines(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(diff): ApiJson<IdDiff>,
) -> Result<impl IntoResponse, AppError> {
    if diff.add.is_empty() && diff.remove.is_empty() {
        return Err(AppError::Validation("add or remove is required".into()));
    }
    if let Some(both) = diff.add.iter().find(|c| diff.remove.contains(c)) {
        return Err(AppError::Validation(format!("Cuisine {} is in both add and remove", both)));
    }
    if RestaurantService::find(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound("Restaurant not found".into()));
    }
    let cuisines = RestaurantService::apply_cuisine_diff(&state.pool, id, &diff).await?;
    Ok(ok("Restaurant cuisines updated successfully", cuisines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> RestaurantBody {
        RestaurantBody {
            name: Some("Trattoria".into()),
            address: Some("1 Main St".into()),
            city: Some("Rome".into()),
            opening_time: Some("11:00".into()),
            ..Default::default()
        }
    }

    #[test]
    fn new_restaurant_requires_core_fields() {
        let mut b = body();
        b.city = None;
        assert_eq!(new_restaurant(b).unwrap_err().to_string(), "city is required");
        let r = new_restaurant(body()).unwrap();
        assert_eq!(r.opening_time.map(|t| t.to_string()).as_deref(), Some("11:00:00"));
    }

    #[test]
    fn new_restaurant_checks_contact_formats() {
        let mut b = body();
        b.email = Some("nope".into());
        assert!(new_restaurant(b).is_err());
    }

    #[test]
    fn table_specs_reject_duplicates_and_zero_capacity() {
        let spec = |n, c| TableSpec {
            table_number: Some(n),
            capacity: Some(c),
        };
        assert_eq!(table_specs(vec![spec(1, 2), spec(2, 4)]).unwrap(), vec![(1, 2), (2, 4)]);
        assert!(table_specs(vec![spec(1, 2), spec(1, 4)]).is_err());
        assert!(table_specs(vec![spec(1, 0)]).is_err());
    }

    #[test]
    fn empty_update_passes_validation() {
        let c = changes(RestaurantBody::default()).unwrap();
        assert!(c.name.is_none() && c.opening_time.is_none());
    }
}
