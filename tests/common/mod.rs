#![allow(dead_code)]

use aristokrat::router::init_router;
use aristokrat::state::AppState;
use aristokrat_core::hash_password;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub password: String,
}

pub async fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    init_router(AppState::from_pool(pool))
}

pub fn generate_unique_username() -> String {
    format!("user-{}", &Uuid::new_v4().simple().to_string()[..12])
}

pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, first_name, last_name, is_admin)
         VALUES ($1, $2, $3, 'Test', 'User', $4)
         RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(&hashed)
    .bind(is_admin)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        username: username.to_string(),
        password: password.to_string(),
    }
}

pub async fn create_test_admin(tx: &mut Transaction<'_, Postgres>) -> TestUser {
    create_test_user(tx, &generate_unique_username(), "", "adminpass123", true).await
}

pub async fn create_test_resident(tx: &mut Transaction<'_, Postgres>) -> TestUser {
    create_test_user(tx, &generate_unique_username(), "", "residentpass", false).await
}

pub struct TestProfile<'a> {
    pub house_number: i32,
    pub entrance_no: i16,
    pub apartment_no: &'a str,
    pub phone: &'a str,
    pub is_active_resident: bool,
}

impl<'a> TestProfile<'a> {
    pub fn at(house_number: i32, entrance_no: i16, apartment_no: &'a str) -> Self {
        Self {
            house_number,
            entrance_no,
            apartment_no,
            phone: "",
            is_active_resident: true,
        }
    }

    pub fn with_phone(mut self, phone: &'a str) -> Self {
        self.phone = phone;
        self
    }
}

pub async fn create_test_profile(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    profile: TestProfile<'_>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO resident_profiles
             (user_id, house_number, entrance_no, apartment_no, phone, is_active_resident)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(user_id)
    .bind(profile.house_number)
    .bind(profile.entrance_no)
    .bind(profile.apartment_no)
    .bind(profile.phone)
    .bind(profile.is_active_resident)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_test_house(tx: &mut Transaction<'_, Postgres>, number: i32) -> i64 {
    sqlx::query_scalar("INSERT INTO houses (number) VALUES ($1) RETURNING id")
        .bind(number)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

pub async fn create_test_entrance(
    tx: &mut Transaction<'_, Postgres>,
    house_id: i64,
    number: i32,
) -> i64 {
    sqlx::query_scalar("INSERT INTO entrances (house_id, number) VALUES ($1, $2) RETURNING id")
        .bind(house_id)
        .bind(number)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

pub async fn create_test_apartment(
    tx: &mut Transaction<'_, Postgres>,
    entrance_id: i64,
    number: &str,
) -> i64 {
    sqlx::query_scalar("INSERT INTO apartments (entrance_id, number) VALUES ($1, $2) RETURNING id")
        .bind(entrance_id)
        .bind(number)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

/// Sends a request and returns the status with the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Logs in and returns the access token.
pub async fn login(app: &Router, login: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "login": login, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["accessToken"].as_str().unwrap().to_string()
}
