//! Resource routers mounted under `/api`.
//! matchit allows one parameter name per position, so sibling routes share `:id` where they overlap.

use crate::handlers::{cuisines, images, payments, preferences, reservations, restaurants, reviews, staff, tables, users};
use crate::state::AppState;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/me", get(users::me))
        .route(
            "/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/:id/password", put(users::change_password))
        .route(
            "/:id/profile-pic",
            get(users::profile_pic).put(users::upload_profile_pic),
        )
        .route("/:id/restaurants", get(users::user_restaurants))
}

pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(restaurants::list_restaurants).post(restaurants::create_restaurant),
        )
        .route("/register", post(restaurants::register_restaurant))
        .route("/mine", get(restaurants::my_restaurant))
        .route(
            "/:id",
            get(restaurants::get_restaurant)
                .put(restaurants::update_restaurant)
                .delete(restaurants::delete_restaurant),
        )
        .route("/:id/stats", get(restaurants::restaurant_stats))
        .route(
            "/:id/cuisines",
            get(restaurants::restaurant_cuisines).put(restaurants::update_restaurant_cuisines),
        )
        .route("/:id/images", get(images::list_images).post(images::upload_images))
        .route("/images/:image_id", get(images::get_image).delete(images::delete_image))
        .route("/:id/staff", get(staff::list_staff).post(staff::add_staff))
        .route("/:id/staff/:user_id", delete(staff::remove_staff))
        .route("/:id/admins", get(staff::list_admins).post(staff::add_admin))
}

pub fn table_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(tables::create_table))
        .route("/available", get(tables::available_tables))
        .route("/restaurant/:restaurant_id", get(tables::restaurant_tables))
        .route(
            "/:id",
            get(tables::get_table).put(tables::update_table).delete(tables::delete_table),
        )
        .route("/:id/status", patch(tables::update_table_status))
        .route("/:id/availability", get(tables::table_availability))
}

pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/user/:user_id", get(reservations::user_reservations))
        .route("/restaurant/:restaurant_id", get(reservations::restaurant_reservations))
        // POST takes the customer's user id, the other methods a reservation id.
        .route(
            "/:id",
            post(reservations::create_reservation)
                .get(reservations::get_reservation)
                .delete(reservations::delete_reservation),
        )
        .route("/:id/approve", patch(reservations::approve_reservation))
        .route("/:id/cancel", patch(reservations::cancel_reservation))
        .route("/:id/complete", patch(reservations::complete_reservation))
}

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(payments::create_payment))
        .route("/reservation/:reservation_id", get(payments::reservation_payments))
        .route("/user/:user_id", get(payments::user_payments))
        .route(
            "/:payment_id",
            get(payments::get_payment).delete(payments::delete_payment),
        )
        .route("/:payment_id/status", patch(payments::update_payment_status))
}

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::create_review))
        .route("/restaurant/:restaurant_id", get(reviews::restaurant_reviews))
        .route("/user/:user_id", get(reviews::user_reviews))
        .route("/:id", put(reviews::update_review).delete(reviews::delete_review))
}

pub fn cuisine_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cuisines::list_cuisines).post(cuisines::create_cuisine))
        .route(
            "/:id",
            get(cuisines::get_cuisine)
                .put(cuisines::update_cuisine)
                .delete(cuisines::delete_cuisine),
        )
}

pub fn preference_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:user_id/cuisines",
            get(preferences::cuisine_preferences).post(preferences::add_cuisine_preference),
        )
        .route(
            "/:user_id/cuisines/:cuisine_id",
            delete(preferences::remove_cuisine_preference),
        )
        .route(
            "/:user_id/restaurants",
            get(preferences::restaurant_preferences).post(preferences::add_restaurant_preference),
        )
        .route(
            "/:user_id/restaurants/:restaurant_id",
            delete(preferences::remove_restaurant_preference),
        )
        .route("/:user_id/recommendations", get(preferences::recommendations))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/restaurants", restaurant_routes())
        .nest("/tables", table_routes())
        .nest("/reservations", reservation_routes())
        .nest("/payments", payment_routes())
        .nest("/reviews", review_routes())
        .nest("/cuisines", cuisine_routes())
        .nest("/preferences", preference_routes())
}
