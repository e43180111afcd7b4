mod common;

use axum::http::StatusCode;
use common::{
    TestProfile, create_test_profile, create_test_resident, create_test_user,
    generate_unique_username, login, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_is_created_on_first_access(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &resident.username, &resident.password).await;

    let (status, body) = send(&app, "GET", "/api/profile/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], resident.username);
    assert_eq!(body["house_number"], serde_json::Value::Null);
    assert_eq!(body["status"], "active");

    let profiles: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM resident_profiles WHERE user_id = $1")
            .bind(resident.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(profiles, 1);

    send(&app, "GET", "/api/profile/me", Some(&token), None).await;
    let profiles: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM resident_profiles WHERE user_id = $1")
            .bind(resident.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(profiles, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_patch_updates_only_given_fields(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    create_test_profile(&mut tx, resident.id, TestProfile::at(1, 2, "50").with_phone("+7000")).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &resident.username, &resident.password).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/profile/me",
        Some(&token),
        Some(json!({ "first_name": "Anna", "car_number": "A123BC", "email": "anna@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Anna");
    assert_eq!(body["last_name"], "User");
    assert_eq!(body["email"], "anna@example.com");
    assert_eq!(body["car_number"], "A123BC");
    assert_eq!(body["phone"], "+7000");
    assert_eq!(body["house_number"], 1);
    assert_eq!(body["entrance_no"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_put_can_clear_address(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    create_test_profile(&mut tx, resident.id, TestProfile::at(1, 2, "50")).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &resident.username, &resident.password).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/profile/me",
        Some(&token),
        Some(json!({ "house_number": null, "entrance_no": null, "apartment_no": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["house_number"], serde_json::Value::Null);
    assert_eq!(body["entrance_no"], serde_json::Value::Null);
    assert_eq!(body["apartment_no"], "");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_validation(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &resident.username, &resident.password).await;

    for payload in [
        json!({ "email": "not-an-email" }),
        json!({ "entrance_no": 9 }),
        json!({ "entrance_no": 0 }),
        json!({ "apartment_no": "12345678901" }),
        json!({ "phone": "1".repeat(33) }),
        json!({ "car_number": "X".repeat(33) }),
    ] {
        let (status, _) = send(&app, "PATCH", "/api/profile/me", Some(&token), Some(payload.clone()))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
    }

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/profile/me",
        Some(&token),
        Some(json!({ "email": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_defaults_without_profile(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &resident.username, &resident.password).await;

    let (status, body) = send(&app, "GET", "/api/me/password-status", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "updated" }));

    let (status, body) = send(&app, "GET", "/api/me/approval-status", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "accepted" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_reads_profile(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    create_test_profile(&mut tx, resident.id, TestProfile::at(1, 1, "1")).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &resident.username, &resident.password).await;

    let (_, body) = send(&app, "GET", "/api/me/password-status", Some(&token), None).await;
    assert_eq!(body, json!({ "status": "not_updated" }));

    let (_, body) = send(&app, "GET", "/api/me/approval-status", Some(&token), None).await;
    assert_eq!(body, json!({ "status": "not_accepted" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let username = generate_unique_username();
    let resident = create_test_user(&mut tx, &username, "", "125", false).await;
    create_test_profile(&mut tx, resident.id, TestProfile::at(1, 3, "125")).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &username, "125").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/me/change-password",
        Some(&token),
        Some(json!({ "old_password": "wrong", "new_password": "longenough" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/me/change-password",
        Some(&token),
        Some(json!({ "old_password": "125", "new_password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/api/me/password-status", Some(&token), None).await;
    assert_eq!(body["status"], "not_updated");

    let (status, body) = send(
        &app,
        "POST",
        "/api/me/change-password",
        Some(&token),
        Some(json!({ "old_password": "125", "new_password": "longenough" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "updated" }));

    // The token issued before the change still works.
    let (status, body) = send(&app, "GET", "/api/me/password-status", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "updated");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "login": username, "password": "125" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login(&app, &username, "longenough").await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blocked_resident_status(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let resident = create_test_resident(&mut tx).await;
    let mut profile = TestProfile::at(1, 1, "1");
    profile.is_active_resident = false;
    create_test_profile(&mut tx, resident.id, profile).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = login(&app, &resident.username, &resident.password).await;

    let (_, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(body["status"], "blocked");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    for (method, uri) in [
        ("GET", "/api/profile/me"),
        ("GET", "/api/me/password-status"),
        ("GET", "/api/me/approval-status"),
    ] {
        let (status, _) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}
