//! Shared assertion helpers.

use axum::http::StatusCode;

use super::app::TestResponse;

/// Assert a 200 OK response.
pub fn assert_ok(response: &TestResponse) {
    assert_eq!(
        response.status,
        StatusCode::OK,
        "expected 200, got {}: {}",
        response.status,
        response.text()
    );
}

/// Assert a specific status code.
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "expected {}, got {}: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert a status code plus an `error` field containing a substring.
pub fn assert_error_contains(response: &TestResponse, expected: StatusCode, needle: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    let error = json["error"].as_str().unwrap_or_default();
    assert!(
        error.contains(needle),
        "error {error:?} does not contain {needle:?}"
    );
}
