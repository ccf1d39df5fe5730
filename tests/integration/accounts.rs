use crate::common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use serial_test::serial;
use tessera::domain::accounts::Role;
use time::OffsetDateTime;
use tower::ServiceExt;

async fn get_with_token(
    app: axum::Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
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
async fn test_profile_requires_token() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let (status, _) = get_with_token(common::test_app(pool.clone()), "/auth/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_profile_rejects_garbage_token() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let (status, _) = get_with_token(
        common::test_app(pool.clone()),
        "/auth/profile",
        Some("not-a-jwt"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_profile_returns_account() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let account = common::create_account(&pool, "alice", "Secret123!", Role::User).await;
    let token = common::token_for(&account);

    let (status, body) = get_with_token(
        common::test_app(pool.clone()),
        "/auth/profile",
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "User");

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_profile_stale_identity_is_404() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    // A validly signed token whose subject was never persisted.
    let now = OffsetDateTime::now_utc();
    let ghost = tessera::domain::accounts::Account {
        id: 1,
        username: "ghost".to_string(),
        email: "ghost@example.com".to_string(),
        password_hash: "$argon2id$unused".to_string(),
        role: Role::User,
        created_at: now,
        updated_at: now,
    };
    let token = common::token_for(&ghost);

    let (status, _) = get_with_token(
        common::test_app(pool.clone()),
        "/auth/profile",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_listing_is_admin_only() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let user = common::create_account(&pool, "alice", "Secret123!", Role::User).await;
    let admin = common::create_account(&pool, "root", "AdminPassword123!", Role::Admin).await;

    let app = common::test_app(pool.clone());

    // No token at all.
    let (status, _) = get_with_token(app.clone(), "/auth/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A User-role token is rejected with the same uniform 401.
    let (status, _) =
        get_with_token(app.clone(), "/auth/users", Some(&common::token_for(&user))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The Admin-role token is accepted and sees every account.
    let (status, body) =
        get_with_token(app, "/auth/users", Some(&common::token_for(&admin))).await;
    assert_eq!(status, StatusCode::OK);

    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    let usernames: Vec<&str> = listed
        .iter()
        .map(|a| a["username"].as_str().unwrap())
        .collect();
    assert!(usernames.contains(&"alice"));
    assert!(usernames.contains(&"root"));

    common::cleanup_test_db(&pool).await;
}
