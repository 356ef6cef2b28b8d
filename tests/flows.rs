//! End-to-end flows against a real database. Each test gets a fresh database with `migrations/` applied.
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

mod support;

use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::PgPool;
use support::{empty, json as json_req, multipart, multipart_with_files, router, send, send_raw, FilePart};

async fn register_user(app: &Router, username: &str, role: &str) -> i64 {
    let email = format!("{}@example.com", username);
    let req = multipart(
        "/api/users/register",
        &[
            ("username", username),
            ("email", &email),
            ("password", "secret-pw"),
            ("firstName", "Test"),
            ("lastName", "User"),
            ("phone", "+1 555 0100"),
            ("role", role),
        ],
    );
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["userId"].as_i64().expect("userId")
}

async fn create_restaurant(app: &Router, admin_id: i64) -> i64 {
    let req = json_req(
        Method::POST,
        "/api/restaurants",
        json!({ "name": "Trattoria", "address": "1 Main St", "city": "Rome", "adminId": admin_id }),
    );
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], "Restaurant added successfully");
    body["data"]["restaurantId"].as_i64().expect("restaurantId")
}

async fn create_table(app: &Router, restaurant_id: i64, number: i32, capacity: i32) -> i64 {
    let req = json_req(
        Method::POST,
        "/api/tables",
        json!({ "restaurantId": restaurant_id, "tableNumber": number, "capacity": capacity }),
    );
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["tableId"].as_i64().expect("tableId")
}

async fn reserve(app: &Router, user_id: i64, restaurant_id: i64, date: &str, time: &str, party: i32) -> (StatusCode, Value) {
    let req = json_req(
        Method::POST,
        &format!("/api/reservations/{}", user_id),
        json!({
            "restaurantId": restaurant_id,
            "reservationDate": date,
            "reservationTime": time,
            "partySize": party
        }),
    );
    send(app, req).await
}

fn next_week() -> String {
    (Utc::now().date_naive() + Duration::days(7)).to_string()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn register_then_login(pool: PgPool) {
    let app = router(pool);
    let user_id = register_user(&app, "ana", "Customer").await;

    let (status, body) = send(
        &app,
        json_req(Method::POST, "/api/users/login", json!({ "username": "ana", "password": "secret-pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["userId"], json!(user_id));
    assert_eq!(body["data"]["role"], "Customer");
    assert!(body["data"].get("passwordHash").is_none());

    let (status, body) = send(
        &app,
        json_req(Method::POST, "/api/users/login", json!({ "username": "ana", "password": "wrong-pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let req = multipart(
        "/api/users/register",
        &[
            ("username", "ana"),
            ("email", "other@example.com"),
            ("password", "secret-pw"),
            ("firstName", "A"),
            ("lastName", "B"),
        ],
    );
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn cuisines_empty_then_added(pool: PgPool) {
    let app = router(pool);
    let (status, body) = send(&app, empty(Method::GET, "/api/cuisines")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No cuisines found");

    let req = json_req(Method::POST, "/api/cuisines", json!({ "name": "Italian" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Cuisine added successfully");

    let (status, body) = send(&app, empty(Method::GET, "/api/cuisines")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Italian");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn reservation_lifecycle(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let customer = register_user(&app, "guest", "Customer").await;
    let restaurant = create_restaurant(&app, admin).await;
    let table = create_table(&app, restaurant, 1, 4).await;
    let date = next_week();

    let (status, body) = reserve(&app, customer, restaurant, &date, "19:00", 6).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "party larger than any table: {}", body);

    let (status, body) = reserve(&app, customer, restaurant, &date, "19:00", 2).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Pending");
    let first = body["data"]["reservationId"].as_i64().unwrap();

    let approve = |id: i64| json_req(Method::PATCH, &format!("/api/reservations/{}/approve", id), json!({ "tableId": table }));
    let (status, body) = send(&app, approve(first)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["status"], "Approved");
    assert_eq!(body["data"]["tableId"], json!(table));

    // Within two hours of the approved booking.
    let (_, body) = reserve(&app, customer, restaurant, &date, "20:00", 2).await;
    let second = body["data"]["reservationId"].as_i64().unwrap();
    let (status, _) = send(&app, approve(second)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let slot = |time: &str| empty(Method::GET, &format!("/api/tables/{}/availability?date={}&time={}", table, date, time));
    let (_, body) = send(&app, slot("20:30")).await;
    assert_eq!(body["data"]["available"], json!(false));
    let (_, body) = send(&app, slot("22:00")).await;
    assert_eq!(body["data"]["available"], json!(true));

    let uri = format!("/api/reservations/restaurant/{}?date={}&status=approved", restaurant, date);
    let (status, body) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["tableNumber"], json!(1));

    let (status, body) = send(&app, empty(Method::PATCH, &format!("/api/reservations/{}/cancel", first))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Cancelled");

    let (status, _) = send(&app, empty(Method::PATCH, &format!("/api/reservations/{}/complete", first))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, empty(Method::PATCH, "/api/reservations/999999/cancel")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn payment_add_and_delete(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let customer = register_user(&app, "guest", "Customer").await;
    let restaurant = create_restaurant(&app, admin).await;
    create_table(&app, restaurant, 1, 2).await;
    let (_, body) = reserve(&app, customer, restaurant, &next_week(), "12:00", 2).await;
    let reservation = body["data"]["reservationId"].as_i64().unwrap();

    let req = json_req(
        Method::POST,
        "/api/payments",
        json!({ "reservationId": reservation, "userId": customer, "amount": 50.0, "paymentMethod": "Card" }),
    );
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["status"], "Completed");
    let payment = body["data"]["paymentId"].as_i64().unwrap();

    let req = json_req(
        Method::POST,
        "/api/payments",
        json!({ "reservationId": reservation, "userId": customer, "amount": 0, "paymentMethod": "Voucher" }),
    );
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["amount"].as_f64(), Some(0.0));

    let (status, body) = send(&app, empty(Method::DELETE, &format!("/api/payments/{}", payment))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment deleted successfully");

    let (status, _) = send(&app, empty(Method::GET, &format!("/api/payments/{}", payment))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn failed_registration_leaves_nothing_behind(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let restaurant = json!({
        "name": "Bistro",
        "address": "2 Side St",
        "city": "Paris",
        "adminId": admin,
        "cuisineIds": [424242],
        "tables": [{ "tableNumber": 1, "capacity": 2 }]
    })
    .to_string();
    let (status, _) = send(&app, multipart("/api/restaurants/register", &[("restaurant", &restaurant)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, empty(Method::GET, "/api/restaurants")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No restaurants found");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn missing_restaurant_is_404(pool: PgPool) {
    let app = router(pool);
    let (status, body) = send(&app, empty(Method::GET, "/api/restaurants/987654")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], "Restaurant not found");

    let (status, _) = send(&app, empty(Method::GET, "/api/restaurants/987654/stats")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];

async fn create_cuisine(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, json_req(Method::POST, "/api/cuisines", json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["cuisineId"].as_i64().expect("cuisineId")
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn available_tables_and_stats(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let customer = register_user(&app, "guest", "Customer").await;
    let restaurant = create_restaurant(&app, admin).await;
    let small = create_table(&app, restaurant, 1, 2).await;
    let large = create_table(&app, restaurant, 2, 4).await;
    let date = next_week();
    let available = |time: &str, party: i32| {
        empty(
            Method::GET,
            &format!(
                "/api/tables/available?restaurantId={}&date={}&time={}&partySize={}",
                restaurant, date, time, party
            ),
        )
    };

    let (status, body) = send(&app, available("19:30", 3)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["tableId"], json!(large));

    let (_, body) = reserve(&app, customer, restaurant, &date, "19:00", 3).await;
    let reservation = body["data"]["reservationId"].as_i64().unwrap();
    let req = json_req(
        Method::PATCH,
        &format!("/api/reservations/{}/approve", reservation),
        json!({ "tableId": large }),
    );
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, available("19:30", 3)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No available tables found");
    let (_, body) = send(&app, available("19:30", 2)).await;
    assert_eq!(body["data"][0]["tableId"], json!(small));

    let req = json_req(
        Method::POST,
        "/api/payments",
        json!({ "reservationId": reservation, "userId": customer, "amount": 30.5, "paymentMethod": "Card" }),
    );
    assert_eq!(send(&app, req).await.0, StatusCode::CREATED);
    let req = json_req(
        Method::POST,
        "/api/reviews",
        json!({ "userId": customer, "restaurantId": restaurant, "rating": 4 }),
    );
    assert_eq!(send(&app, req).await.0, StatusCode::CREATED);

    let (status, body) = send(&app, empty(Method::GET, &format!("/api/restaurants/{}/stats", restaurant))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let stats = &body["data"];
    assert_eq!(stats["totalReservations"], json!(1));
    assert_eq!(stats["approvedReservations"], json!(1));
    assert_eq!(stats["pendingReservations"], json!(0));
    assert_eq!(stats["totalRevenue"].as_f64(), Some(30.5));
    assert_eq!(stats["averageRating"].as_f64(), Some(4.0));
    assert_eq!(stats["reviewCount"], json!(1));
    assert_eq!(stats["tableCount"], json!(2));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn registration_with_images_then_image_crud(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let italian = create_cuisine(&app, "Italian").await;
    let restaurant = json!({
        "name": "Bistro",
        "address": "2 Side St",
        "city": "Paris",
        "adminId": admin,
        "cuisineIds": [italian, italian],
        "tables": [{ "tableNumber": 1, "capacity": 2 }, { "tableNumber": 2, "capacity": 6 }]
    })
    .to_string();
    let images = [
        FilePart { name: "image", file_name: "front.png", content_type: "image/png", bytes: PNG },
        FilePart { name: "image", file_name: "room.png", content_type: "image/png", bytes: PNG },
    ];
    let req = multipart_with_files(
        Method::POST,
        "/api/restaurants/register",
        &[("restaurant", &restaurant)],
        &images,
    );
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], "Restaurant registered successfully");
    assert_eq!(body["data"]["cuisineIds"], json!([italian]));
    assert_eq!(body["data"]["tables"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"]["images"][0]["fileName"], "front.png");
    let restaurant_id = body["data"]["restaurantId"].as_i64().unwrap();
    let image_id = body["data"]["images"][0]["imageId"].as_i64().unwrap();

    let (status, content_type, bytes) =
        send_raw(&app, empty(Method::GET, &format!("/api/restaurants/images/{}", image_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(bytes, PNG);

    let extra = [FilePart { name: "image", file_name: "bar.png", content_type: "image/png", bytes: PNG }];
    let uri = format!("/api/restaurants/{}/images", restaurant_id);
    let (status, body) = send(&app, multipart_with_files(Method::POST, &uri, &[], &extra)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let (_, body) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));

    let image_uri = format!("/api/restaurants/images/{}", image_id);
    let (status, body) = send(&app, empty(Method::DELETE, &image_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Image deleted successfully");
    let (status, _) = send(&app, empty(Method::GET, &image_uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn restaurant_cuisine_diff(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let restaurant = create_restaurant(&app, admin).await;
    let italian = create_cuisine(&app, "Italian").await;
    let pizza = create_cuisine(&app, "Pizza").await;
    let uri = format!("/api/restaurants/{}/cuisines", restaurant);

    let (status, body) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No cuisines found");

    let (status, body) = send(&app, json_req(Method::PUT, &uri, json!({ "add": [italian, pizza] }))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let (_, body) = send(&app, json_req(Method::PUT, &uri, json!({ "remove": [italian] }))).await;
    assert_eq!(body["data"][0]["cuisineId"], json!(pizza));
    let (status, body) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, empty(Method::GET, "/api/restaurants/987654/cuisines")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Restaurant not found");
    let req = json_req(Method::PUT, "/api/restaurants/987654/cuisines", json!({ "add": [pizza] }));
    assert_eq!(send(&app, req).await.0, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn staff_and_admin_membership(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let waiter = register_user(&app, "waiter", "Staff").await;
    let restaurant = create_restaurant(&app, admin).await;
    let staff_uri = format!("/api/restaurants/{}/staff", restaurant);

    let req = json_req(Method::POST, &staff_uri, json!({ "userId": waiter, "position": "Waiter" }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["position"], "Waiter");

    let req = json_req(Method::POST, &staff_uri, json!({ "userId": waiter, "position": "Host" }));
    assert_eq!(send(&app, req).await.0, StatusCode::CREATED);
    let (_, body) = send(&app, empty(Method::GET, &staff_uri)).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["position"], "Host");

    let member_uri = format!("{}/{}", staff_uri, waiter);
    assert_eq!(send(&app, empty(Method::DELETE, &member_uri)).await.0, StatusCode::OK);
    let (status, body) = send(&app, empty(Method::DELETE, &member_uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Staff member not found");

    let admins_uri = format!("/api/restaurants/{}/admins", restaurant);
    let (status, body) = send(&app, json_req(Method::POST, &admins_uri, json!({ "userId": waiter }))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["username"], "waiter");
    let (_, body) = send(&app, empty(Method::GET, &admins_uri)).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let (status, body) = send(&app, json_req(Method::POST, &admins_uri, json!({ "userId": 999999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn preferences_drive_recommendations(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let customer = register_user(&app, "guest", "Customer").await;
    let italian = create_cuisine(&app, "Italian").await;
    let trattoria = create_restaurant(&app, admin).await;
    let req = json_req(
        Method::POST,
        "/api/restaurants",
        json!({ "name": "Sushi Bar", "address": "3 Dock Rd", "city": "Rome" }),
    );
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let req = json_req(
        Method::PUT,
        &format!("/api/restaurants/{}/cuisines", trattoria),
        json!({ "add": [italian] }),
    );
    assert_eq!(send(&app, req).await.0, StatusCode::OK);

    let base = format!("/api/preferences/{}", customer);
    let (status, _) = send(&app, empty(Method::GET, &format!("{}/recommendations", base))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = json_req(Method::POST, &format!("{}/cuisines", base), json!({ "cuisineId": italian }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"][0]["name"], "Italian");

    let (status, body) = send(&app, empty(Method::GET, &format!("{}/recommendations", base))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["restaurantId"], json!(trattoria));

    let req = json_req(Method::POST, &format!("{}/restaurants", base), json!({ "restaurantId": trattoria }));
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"][0]["restaurantId"], json!(trattoria));
    let favourite = format!("{}/restaurants/{}", base, trattoria);
    assert_eq!(send(&app, empty(Method::DELETE, &favourite)).await.0, StatusCode::OK);
    let (status, body) = send(&app, empty(Method::GET, &format!("{}/restaurants", base))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No restaurant preferences found");

    let liked = format!("{}/cuisines/{}", base, italian);
    assert_eq!(send(&app, empty(Method::DELETE, &liked)).await.0, StatusCode::OK);
    assert_eq!(send(&app, empty(Method::DELETE, &liked)).await.0, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn reviews_create_list_update(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    let customer = register_user(&app, "guest", "Customer").await;
    let restaurant = create_restaurant(&app, admin).await;
    let review = json!({ "userId": customer, "restaurantId": restaurant, "rating": 3, "comment": "Fine" });

    let (status, body) = send(&app, json_req(Method::POST, "/api/reviews", review.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let review_id = body["data"]["reviewId"].as_i64().unwrap();
    let (status, _) = send(&app, json_req(Method::POST, "/api/reviews", review)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, empty(Method::GET, &format!("/api/reviews/restaurant/{}", restaurant))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["username"], "guest");
    let (_, body) = send(&app, empty(Method::GET, &format!("/api/reviews/user/{}", customer))).await;
    assert_eq!(body["data"][0]["restaurantName"], "Trattoria");

    let uri = format!("/api/reviews/{}", review_id);
    let (status, body) = send(&app, json_req(Method::PUT, &uri, json!({ "rating": 5 }))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["rating"], json!(5));
    assert_eq!(body["data"]["comment"], "Fine");
    let (status, body) = send(&app, json_req(Method::PUT, &uri, json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields to update");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn profile_picture_and_password_change(pool: PgPool) {
    let app = router(pool);
    let user = register_user(&app, "ana", "Customer").await;
    let pic_uri = format!("/api/users/{}/profile-pic", user);

    let (status, _, _) = send_raw(&app, empty(Method::GET, &pic_uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let pic = [FilePart { name: "ProfilePic", file_name: "me.png", content_type: "image/png", bytes: PNG }];
    let (status, body) = send(&app, multipart_with_files(Method::PUT, &pic_uri, &[], &pic)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["hasProfilePic"], json!(true));
    let (status, content_type, bytes) = send_raw(&app, empty(Method::GET, &pic_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(bytes, PNG);

    let password_uri = format!("/api/users/{}/password", user);
    let change = |current: &str| {
        json_req(
            Method::PUT,
            &password_uri,
            json!({ "currentPassword": current, "newPassword": "fresh-secret" }),
        )
    };
    let (status, body) = send(&app, change("not-my-password")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Current password is incorrect");
    let (status, body) = send(&app, change("secret-pw")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password updated successfully");

    let login = |password: &str| {
        json_req(Method::POST, "/api/users/login", json!({ "username": "ana", "password": password }))
    };
    assert_eq!(send(&app, login("secret-pw")).await.0, StatusCode::UNAUTHORIZED);
    assert_eq!(send(&app, login("fresh-secret")).await.0, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn restaurant_filters_match_literally(pool: PgPool) {
    let app = router(pool);
    let admin = register_user(&app, "owner", "Admin").await;
    create_restaurant(&app, admin).await;
    let req = json_req(
        Method::POST,
        "/api/restaurants",
        json!({ "name": "Chez Paul", "address": "4 Rue Neuve", "city": "Paris" }),
    );
    assert_eq!(send(&app, req).await.0, StatusCode::CREATED);

    let count = |body: &Value| body["data"].as_array().map(Vec::len);
    let (_, body) = send(&app, empty(Method::GET, "/api/restaurants")).await;
    assert_eq!(count(&body), Some(2));
    let (status, body) = send(&app, empty(Method::GET, "/api/restaurants?city=rome")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count(&body), Some(1));
    let (_, body) = send(&app, empty(Method::GET, "/api/restaurants?search=tratt")).await;
    assert_eq!(body["data"][0]["name"], "Trattoria");

    for uri in ["/api/restaurants?city=%25", "/api/restaurants?search=_", "/api/restaurants?search=%25"] {
        let (status, body) = send(&app, empty(Method::GET, uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}: {}", uri, body);
    }
}
