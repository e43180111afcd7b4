mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_admin, create_test_resident, login, send, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn post_raw(app: &axum::Router, uri: &str, body: &'static str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn device_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM devices")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_entrance_device_defaults_to_off(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(&app, "GET", "/api/entrances/3/door", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(false));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_every_valid_key_reads_back_what_was_set(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let mut uris: Vec<String> = Vec::new();
    for no in 1..=8 {
        for kind in ["door", "lift_pass", "lift_gruz"] {
            uris.push(format!("/api/entrances/{no}/{kind}"));
        }
    }
    for kind in ["kalitka1", "kalitka2", "kalitka3", "kalitka4", "parking"] {
        uris.push(format!("/api/{kind}"));
    }

    for (i, uri) in uris.iter().enumerate() {
        let state = i % 2 == 0;
        let (status, body) = send(&app, "POST", uri, None, Some(json!({ "state": state }))).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!(state), "{uri}");

        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!(state), "{uri}");
    }

    assert_eq!(device_count(&pool).await, 29);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_toggle_overwrites_previous_state(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    send(&app, "POST", "/api/parking", None, Some(json!({ "state": true }))).await;
    let (_, body) = send(&app, "POST", "/api/parking", None, Some(json!({ "state": false }))).await;
    assert_eq!(body, json!(false));

    let (_, body) = send(&app, "GET", "/api/parking", None, None).await;
    assert_eq!(body, json!(false));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_keys_are_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    for uri in [
        "/api/entrances/0/door",
        "/api/entrances/9/door",
        "/api/entrances/abc/door",
        "/api/entrances/1/parking",
        "/api/entrances/1/garage",
        "/api/door",
        "/api/kalitka5",
    ] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!(false), "{uri}");

        let (status, body) = send(&app, "POST", uri, None, Some(json!({ "state": true }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!(false), "{uri}");
    }

    assert_eq!(device_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_kind_is_checked_before_payload(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = post_raw(&app, "/api/entrances/9/door", "garbage").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "false");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_payload_is_bad_request(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    for payload in [
        "garbage",
        "{}",
        "true",
        r#"{"state": "true"}"#,
        r#"{"state": 1}"#,
        r#"{"state": null}"#,
    ] {
        let (status, body) = post_raw(&app, "/api/kalitka1", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body, "false", "{payload}");
    }

    let (_, body) = send(&app, "GET", "/api/kalitka1", None, None).await;
    assert_eq!(body, json!(false));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repeated_reads_create_one_row(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    for _ in 0..3 {
        send(&app, "GET", "/api/entrances/2/lift_pass", None, None).await;
        send(&app, "GET", "/api/kalitka2", None, None).await;
    }

    assert_eq!(device_count(&pool).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_check_constraint_rejects_misplaced_entrance(pool: PgPool) {
    let door_without_entrance =
        sqlx::query("INSERT INTO devices (kind, entrance_no) VALUES ('door', NULL)")
            .execute(&pool)
            .await;
    assert!(door_without_entrance.is_err());

    let parking_with_entrance =
        sqlx::query("INSERT INTO devices (kind, entrance_no) VALUES ('parking', 1)")
            .execute(&pool)
            .await;
    assert!(parking_with_entrance.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_seed_is_idempotent(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_admin(&mut tx).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &admin.username, &admin.password).await;

    let (status, body) = send(&app, "POST", "/api/admin/devices/seed", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "created": 29 }));

    let (status, body) = send(&app, "POST", "/api/admin/devices/seed", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "created": 0 }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_list_and_bulk_state(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_admin(&mut tx).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &admin.username, &admin.password).await;
    send(&app, "POST", "/api/admin/devices/seed", Some(&token), None).await;

    let (status, doors) = send(
        &app,
        "GET",
        "/api/admin/devices?kind=door",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let doors = doors.as_array().unwrap();
    assert_eq!(doors.len(), 8);
    let ids: Vec<i64> = doors.iter().map(|d| d["id"].as_i64().unwrap()).collect();

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/devices/state",
        Some(&token),
        Some(json!({ "ids": ids, "state": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "updated": 8 }));

    let (_, on) = send(&app, "GET", "/api/admin/devices?state=true", Some(&token), None).await;
    assert_eq!(on.as_array().unwrap().len(), 8);

    let (_, body) = send(&app, "GET", "/api/entrances/5/door", None, None).await;
    assert_eq!(body, json!(true));

    let (_, entrance_two) = send(
        &app,
        "GET",
        "/api/admin/devices?entrance_no=2",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(entrance_two.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_bulk_state_requires_ids(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_admin(&mut tx).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &admin.username, &admin.password).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/devices/state",
        Some(&token),
        Some(json!({ "ids": [], "state": true })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_device_routes_reject_residents(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let (status, _) = send(&app, "GET", "/api/admin/devices", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app, &resident.username, &resident.password).await;
    let (status, body) = send(&app, "GET", "/api/admin/devices", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Admin access required");

    let (status, _) = send(&app, "POST", "/api/admin/devices/seed", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
