//! Requests that never reach a handler still get the JSON error body.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/no/such/route", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["type"], "invalid_request_error");
    assert_eq!(response.error_code(), "route_not_found");
    assert_eq!(response.body["error"]["message"], "No route for /no/such/route");
}

#[tokio::test]
async fn test_wrong_method_is_json_method_not_allowed() {
    let app = TestApp::new();

    let response = app.request("PUT", "/auth/login", None, None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["error"]["type"], "invalid_request_error");
    assert_eq!(response.error_code(), "method_not_allowed");
}
