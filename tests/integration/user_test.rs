//! Integration tests for the user directory endpoints.

use axum::http::StatusCode;
use serde_json::json;

use userhub_entity::user::UserRole;

use crate::helpers::{TestApp, user_id};

#[tokio::test]
async fn test_me_returns_caller() {
    let app = TestApp::new();
    let user = app.seed_user("alice", UserRole::User).await;
    let token = app.access_token("alice").await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(user_id(&response.body), user.id);
    assert!(response.body.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_soft_delete_then_restore() {
    let app = TestApp::new();
    app.seed_user("root", UserRole::Admin).await;
    let target = app.seed_user("ursula", UserRole::User).await;
    let admin = app.access_token("root").await;
    let path = format!("/users/{}", target.id);

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), "resource_not_found");

    let again = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let restored = app
        .request("PATCH", &format!("{path}/restore"), None, Some(&admin))
        .await;
    assert_eq!(restored.status, StatusCode::OK);
    assert_eq!(restored.body["is_deleted"], false);

    let found = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["username"], "ursula");
}

#[tokio::test]
async fn test_restore_active_user_is_validation_error() {
    let app = TestApp::new();
    app.seed_user("root", UserRole::Admin).await;
    let target = app.seed_user("victor", UserRole::User).await;
    let admin = app.access_token("root").await;

    let response = app
        .request(
            "PATCH",
            &format!("/users/{}/restore", target.id),
            None,
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["message"], "user not deleted");
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let app = TestApp::new();
    let target = app.seed_user("wendy", UserRole::User).await;
    let token = app.access_token("wendy").await;

    let list = app.request("GET", "/users/all", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);
    assert_eq!(list.error_code(), "insufficient_permissions");

    let hard = app
        .request(
            "DELETE",
            &format!("/users/{}/hard", target.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(hard.status, StatusCode::FORBIDDEN);

    let restore = app
        .request(
            "PATCH",
            &format!("/users/{}/restore", target.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(restore.status, StatusCode::FORBIDDEN);

    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_list_users_newest_first_with_paging() {
    let app = TestApp::new();
    app.seed_user("root", UserRole::Admin).await;
    for name in ["u1", "u2", "u3"] {
        app.seed_user(name, UserRole::User).await;
    }
    let admin = app.access_token("root").await;

    let all = app.request("GET", "/users/all", None, Some(&admin)).await;
    assert_eq!(all.status, StatusCode::OK);
    let names: Vec<&str> = all
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["u3", "u2", "u1", "root"]);

    let page = app
        .request("GET", "/users/all?skip=1&limit=2", None, Some(&admin))
        .await;
    let names: Vec<&str> = page
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["u2", "u1"]);

    let bad = app
        .request("GET", "/users/all?limit=lots", None, Some(&admin))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_fields_and_conflicts() {
    let app = TestApp::new();
    let user = app.seed_user("xena", UserRole::User).await;
    app.seed_user("yuri", UserRole::User).await;
    let token = app.access_token("xena").await;
    let path = format!("/users/{}", user.id);

    let updated = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "firstname": "Xenia" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["firstname"], "Xenia");
    assert_eq!(updated.body["username"], "xena");

    let same_name = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "username": "xena" })),
            Some(&token),
        )
        .await;
    assert_eq!(same_name.status, StatusCode::OK);

    let conflict = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "username": "yuri" })),
            Some(&token),
        )
        .await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);
    assert_eq!(conflict.error_code(), "username_taken");

    let empty = app.request("PATCH", &path, Some(json!({})), Some(&token)).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["error"]["message"], "No update data provided");
}

#[tokio::test]
async fn test_conflict_with_soft_deleted_user() {
    let app = TestApp::new();
    app.seed_user("root", UserRole::Admin).await;
    let ghost = app.seed_user("ghost", UserRole::User).await;
    let admin = app.access_token("root").await;

    let deleted = app
        .request("DELETE", &format!("/users/{}", ghost.id), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let signup = app
        .request(
            "POST",
            "/auth/signup",
            Some(json!({
                "firstname": "New",
                "lastname": "Ghost",
                "email": "new@test.com",
                "username": "ghost",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(signup.status, StatusCode::CONFLICT);
    assert_eq!(signup.error_code(), "username_taken");
}

#[tokio::test]
async fn test_hard_delete_removes_record() {
    let app = TestApp::new();
    app.seed_user("root", UserRole::Admin).await;
    let target = app.seed_user("zack", UserRole::User).await;
    let admin = app.access_token("root").await;
    let path = format!("/users/{}/hard", target.id);

    let first = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(app.users.len().await, 1);

    let second = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_create_user() {
    let app = TestApp::new();
    app.seed_user("root", UserRole::Admin).await;
    let admin = app.access_token("root").await;

    let response = app
        .request(
            "POST",
            "/users/",
            Some(json!({
                "firstname": "Made",
                "lastname": "ByAdmin",
                "email": "made@test.com",
                "username": "made",
                "password": "password123",
            })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "user");
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = TestApp::new();
    app.seed_user("ann", UserRole::User).await;
    let token = app.access_token("ann").await;

    let response = app
        .request("GET", "/users/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["cache"], "connected");
}
