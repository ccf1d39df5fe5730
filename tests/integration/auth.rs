use crate::common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use serial_test::serial;
use tower::ServiceExt;

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[serial]
async fn test_register_success() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let (status, body) = post_json(
        common::test_app(pool.clone()),
        "/auth/register",
        json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "Secret123!"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@x.com");
    assert_eq!(body["role"], "User");
    // Neither the password nor its hash leaves the service.
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_register_duplicate_is_nonspecific_400() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let app = common::test_app(pool.clone());
    let request = json!({
        "username": "alice",
        "email": "alice@x.com",
        "password": "Secret123!"
    });

    let (status, _) = post_json(app.clone(), "/auth/register", request.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // Same username, different email.
    let (status, body) = post_json(
        app.clone(),
        "/auth/register",
        json!({
            "username": "alice",
            "email": "other@x.com",
            "password": "Secret123!"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["errors"][0]["detail"].as_str().unwrap();
    assert!(!detail.contains("alice"));

    // Same email, different username: identical answer.
    let (status, body) = post_json(
        app,
        "/auth/register",
        json!({
            "username": "bob",
            "email": "alice@x.com",
            "password": "Secret123!"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["detail"], detail);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_register_rejects_invalid_email() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let (status, _) = post_json(
        common::test_app(pool.clone()),
        "/auth/register",
        json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "Secret123!"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_login_returns_token_pair() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let app = common::test_app(pool.clone());
    post_json(
        app.clone(),
        "/auth/register",
        json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "Secret123!"
        }),
    )
    .await;

    let (status, body) = post_json(
        app,
        "/auth/login",
        json!({
            "username": "alice",
            "password": "Secret123!"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "User");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_login_failures_are_indistinguishable() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let app = common::test_app(pool.clone());
    post_json(
        app.clone(),
        "/auth/register",
        json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "Secret123!"
        }),
    )
    .await;

    let (wrong_password_status, wrong_password_body) = post_json(
        app.clone(),
        "/auth/login",
        json!({
            "username": "alice",
            "password": "WrongPassword!"
        }),
    )
    .await;

    let (unknown_user_status, unknown_user_body) = post_json(
        app,
        "/auth/login",
        json!({
            "username": "mallory",
            "password": "Secret123!"
        }),
    )
    .await;

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password_body, unknown_user_body);

    common::cleanup_test_db(&pool).await;
}

/// Full lifecycle: register, login, rotate, replay the spent value.
#[tokio::test]
#[serial]
async fn test_refresh_rotation_lifecycle() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let app = common::test_app(pool.clone());

    let (status, _) = post_json(
        app.clone(),
        "/auth/register",
        json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "Secret123!"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, login_body) = post_json(
        app.clone(),
        "/auth/login",
        json!({
            "username": "alice",
            "password": "Secret123!"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let original = login_body["refreshToken"].as_str().unwrap().to_string();

    // First redemption succeeds and hands back a different value.
    let (status, refresh_body) = post_json(
        app.clone(),
        "/auth/refresh",
        json!({ "refreshToken": original.clone() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rotated = refresh_body["refreshToken"].as_str().unwrap();
    assert_ne!(rotated, original);
    assert!(!refresh_body["token"].as_str().unwrap().is_empty());

    // Replaying the original value fails even though a newer token exists.
    let (status, _) = post_json(
        app,
        "/auth/refresh",
        json!({ "refreshToken": original }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_refresh_unknown_token_unauthorized() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let (status, _) = post_json(
        common::test_app(pool.clone()),
        "/auth/refresh",
        json!({ "refreshToken": "never-issued" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_refresh_expired_token_is_spent_by_the_attempt() {
    use tessera::application::auth::tokens::{generate_refresh_token_value, hash_token};
    use tessera::domain::accounts::Role;
    use tessera::domain::auth::{NewRefreshToken, RefreshTokenRepository};
    use tessera::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;

    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let account = common::create_account(&pool, "alice", "Secret123!", Role::User).await;

    // Plant a row that expired an hour ago.
    let value = generate_refresh_token_value();
    let repo = PostgresRefreshTokenRepository::new(pool.clone());
    repo.create(NewRefreshToken {
        account_id: account.id,
        token_hash: hash_token(&value),
        expires_at: time::OffsetDateTime::now_utc() - time::Duration::hours(1),
    })
    .await
    .unwrap();

    let app = common::test_app(pool.clone());
    let (status, _) = post_json(
        app.clone(),
        "/auth/refresh",
        json!({ "refreshToken": value.clone() }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The failed attempt still deleted the row.
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // And the value cannot resurrect.
    let (status, _) = post_json(app, "/auth/refresh", json!({ "refreshToken": value })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}
