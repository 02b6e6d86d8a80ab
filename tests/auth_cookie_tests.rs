// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie tests.
//!
//! These tests verify the cookie set by authentication carries the session
//! and that logout expires it.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app, json_request};

fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

#[tokio::test]
async fn test_authenticate_sets_http_only_session_cookie() {
    let (app, _) = create_test_app();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/spotcheck/v1/saveAccount",
            Some(json!({ "email": "ada@example.com", "password": "analytical-engine" })),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/spotcheck/v1/authenticateAccount",
            Some(json!({ "email": "ada@example.com", "password": "analytical-engine" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = find_cookie(&set_cookie_headers(&response), "spotcheck_token");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    // Default test config serves a localhost frontend
    assert!(!cookie.contains("Secure"));

    // The cookie alone is enough to reach protected routes
    let session = cookie.split(';').next().unwrap().to_string();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/spotcheck/v1/me")
                .header(header::COOKIE, session)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_failed_authentication_sets_no_cookie() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/spotcheck/v1/authenticateAccount",
            Some(json!({ "email": "nobody@example.com", "password": "whatever-it-is" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie_headers(&response).is_empty());
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/spotcheck/v1/logout")
                .header(header::COOKIE, "spotcheck_token=test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookie = find_cookie(&set_cookie_headers(&response), "spotcheck_token");
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Path=/"));
}
