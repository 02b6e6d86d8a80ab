// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spot listing pagination tests.
//!
//! These tests verify that:
//! 1. A bounded listing always hands back a token while records remain
//! 2. Following tokens visits every record exactly once, in store order
//! 3. Bad cursors and counts are rejected

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{body_json, create_test_app, json_request};

async fn seed(app: &axum::Router, count: usize) {
    for i in 0..count {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/spotcheck/v1/spot",
                Some(json!({ "id": format!("spot-{:02}", i), "name": format!("Spot {}", i) })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

async fn list(app: &axum::Router, query: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request("GET", &format!("/spotcheck/v1/spot{}", query), None))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

fn ids(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_count_two_over_five_records() {
    let (app, _) = create_test_app();
    seed(&app, 5).await;

    let (status, first) = list(&app, "?count=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&first), vec!["spot-00", "spot-01"]);
    let token = first["nextPageToken"].as_str().expect("token on first page");

    let (_, second) = list(&app, &format!("?count=2&cursor={}", token)).await;
    assert_eq!(ids(&second), vec!["spot-02", "spot-03"]);
    let token = second["nextPageToken"].as_str().expect("token on second page");

    let (_, third) = list(&app, &format!("?count=2&cursor={}", token)).await;
    assert_eq!(ids(&third), vec!["spot-04"]);
    assert!(third.get("nextPageToken").is_none());
}

#[tokio::test]
async fn test_no_cursor_no_count_returns_everything() {
    let (app, _) = create_test_app();
    seed(&app, 5).await;

    let (status, page) = list(&app, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page).len(), 5);
    assert!(page.get("nextPageToken").is_none());
}

#[tokio::test]
async fn test_empty_cursor_starts_at_beginning() {
    let (app, _) = create_test_app();
    seed(&app, 3).await;

    let (status, page) = list(&app, "?cursor=&count=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page), vec!["spot-00", "spot-01", "spot-02"]);
}

#[tokio::test]
async fn test_empty_collection() {
    let (app, _) = create_test_app();

    let (status, page) = list(&app, "?count=5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&page).is_empty());
    assert!(page.get("nextPageToken").is_none());
}

#[tokio::test]
async fn test_malformed_cursor_is_bad_request() {
    let (app, _) = create_test_app();

    let (status, body) = list(&app, "?cursor=not-a-cursor!").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_count_out_of_range_is_bad_request() {
    let (app, _) = create_test_app();

    let (status, _) = list(&app, "?count=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = list(&app, "?count=1001").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_count_is_json_bad_request() {
    let (app, _) = create_test_app();

    for query in ["?count=abc", "?count=-1"] {
        let (status, body) = list(&app, query).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", query);
        assert_eq!(body["error"], "bad_request");
    }
}
