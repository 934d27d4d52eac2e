//! Integration tests for the authentication flow.

use axum::http::StatusCode;
use serde_json::json;

use userhub_entity::user::UserRole;

use crate::helpers::{TestApp, email_for, test_config, token_field};

#[tokio::test]
async fn test_signup_creates_user_without_hash() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstname": "Alice",
                "lastname": "Liddell",
                "email": "a@x.com",
                "username": "alice",
                "password": "wonderland",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["role"], "user");
    assert_eq!(response.body["is_deleted"], false);
    assert!(response.body.get("hashed_password").is_none());
    assert!(response.body.get("password").is_none());
}

#[tokio::test]
async fn test_signup_conflicts() {
    let app = TestApp::new();
    app.seed_user("bob", UserRole::User).await;

    let taken_username = app
        .request(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstname": "Other",
                "lastname": "Bob",
                "email": "other@x.com",
                "username": "bob",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(taken_username.status, StatusCode::CONFLICT);
    assert_eq!(taken_username.error_code(), "username_taken");

    let taken_email = app
        .request(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstname": "Other",
                "lastname": "Bob",
                "email": email_for("bob"),
                "username": "bobby",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(taken_email.status, StatusCode::CONFLICT);
    assert_eq!(taken_email.error_code(), "email_in_use");
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstname": "No",
                "lastname": "Email",
                "email": "not-an-email",
                "username": "noemail",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "validation_error");
}

#[tokio::test]
async fn test_login_returns_distinct_bearer_pair() {
    let app = TestApp::new();
    app.seed_user("carol", UserRole::User).await;

    let body = app.login("carol").await;
    let access = token_field(&body, "access_token");
    let refresh = token_field(&body, "refresh_token");

    assert_eq!(body["token_type"], "bearer");
    assert_ne!(access, refresh);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.seed_user("dave", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": email_for("dave"), "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "invalid_credentials");
    assert_eq!(response.headers.get("www-authenticate").unwrap(), "Bearer");
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "nobody@test.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "invalid_credentials");
}

#[tokio::test]
async fn test_login_input_bounds() {
    let app = TestApp::new();

    let short_password = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "a@x.com", "password": "12345" })),
            None,
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let long_email = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({
                "email": format!("{}@x.com", "a".repeat(40)),
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(long_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_revokes_access_but_not_refresh() {
    let app = TestApp::new();
    app.seed_user("alice", UserRole::User).await;

    let body = app.login("alice").await;
    let access = token_field(&body, "access_token");
    let refresh = token_field(&body, "refresh_token");

    let logout = app.request("POST", "/auth/logout", None, Some(&access)).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["message"], "Logged out successfully");

    let reused = app.request("GET", "/users/me", None, Some(&access)).await;
    assert_eq!(reused.status, StatusCode::FORBIDDEN);
    assert_eq!(reused.error_code(), "token_revoked");

    let refreshed = app
        .request("POST", "/auth/refresh_token", None, Some(&refresh))
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);

    let new_access = token_field(&refreshed.body, "access_token");
    let me = app.request("GET", "/users/me", None, Some(&new_access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "alice");
}

#[tokio::test]
async fn test_logout_twice_is_rejected() {
    let app = TestApp::new();
    app.seed_user("erin", UserRole::User).await;
    let access = app.access_token("erin").await;

    let first = app.request("POST", "/auth/logout", None, Some(&access)).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.request("POST", "/auth/logout", None, Some(&access)).await;
    assert_eq!(second.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_kinds_are_not_interchangeable() {
    let app = TestApp::new();
    app.seed_user("frank", UserRole::User).await;

    let body = app.login("frank").await;
    let access = token_field(&body, "access_token");
    let refresh = token_field(&body, "refresh_token");

    let refresh_as_access = app.request("GET", "/users/me", None, Some(&refresh)).await;
    assert_eq!(refresh_as_access.status, StatusCode::UNAUTHORIZED);
    assert_eq!(refresh_as_access.error_code(), "wrong_token_type");

    let access_as_refresh = app
        .request("POST", "/auth/refresh_token", None, Some(&access))
        .await;
    assert_eq!(access_as_refresh.status, StatusCode::UNAUTHORIZED);
    assert_eq!(access_as_refresh.error_code(), "wrong_token_type");
}

#[tokio::test]
async fn test_refresh_keeps_old_token_usable_by_default() {
    let app = TestApp::new();
    app.seed_user("gina", UserRole::User).await;
    let refresh = token_field(&app.login("gina").await, "refresh_token");

    let first = app
        .request("POST", "/auth/refresh_token", None, Some(&refresh))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("POST", "/auth/refresh_token", None, Some(&refresh))
        .await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_strict_rotation_revokes_presented_refresh_token() {
    let mut config = test_config();
    config.auth.rotate_refresh_tokens = true;
    let app = TestApp::with_config(config);
    app.seed_user("hank", UserRole::User).await;
    let refresh = token_field(&app.login("hank").await, "refresh_token");

    let rotated = app
        .request("POST", "/auth/refresh_token", None, Some(&refresh))
        .await;
    assert_eq!(rotated.status, StatusCode::OK);

    let replayed = app
        .request("POST", "/auth/refresh_token", None, Some(&refresh))
        .await;
    assert_eq!(replayed.status, StatusCode::FORBIDDEN);
    assert_eq!(replayed.error_code(), "token_revoked");

    let next = token_field(&rotated.body, "refresh_token");
    let chained = app
        .request("POST", "/auth/refresh_token", None, Some(&next))
        .await;
    assert_eq!(chained.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_access_token_is_rejected() {
    let app = TestApp::new();
    let user = app.seed_user("ivy", UserRole::User).await;
    let expired = app.expired_access_token(&user);

    let response = app.request("GET", "/users/me", None, Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "token_expired");
}

#[tokio::test]
async fn test_missing_or_garbled_header_is_malformed() {
    let app = TestApp::new();

    let missing = app.request("GET", "/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "invalid_token");

    let garbage = app
        .request("GET", "/users/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_code(), "invalid_token");
}

#[tokio::test]
async fn test_deleted_user_cannot_login_or_use_tokens() {
    let app = TestApp::new();
    let user = app.seed_user("jill", UserRole::User).await;
    let access = app.access_token("jill").await;

    let path = format!("/users/{}", user.id);
    let deleted = app.request("DELETE", &path, None, Some(&access)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let stale = app.request("GET", "/users/me", None, Some(&access)).await;
    assert_eq!(stale.status, StatusCode::NOT_FOUND);

    let login = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": email_for("jill"), "password": crate::helpers::PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}
