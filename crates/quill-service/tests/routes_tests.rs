// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{service_with, StubToolchain, CONTAINER};
use quill_service::{build_router, AppState};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn router_with(server: &MockServer, toolchain: StubToolchain) -> axum::Router {
    let service = Arc::new(service_with(server, toolchain));
    build_router(AppState::new(service))
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn validate_maps_result_to_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{CONTAINER}/abc")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"println(1);".to_vec()))
        .mount(&server)
        .await;

    let router = router_with(&server, StubToolchain::default()).await;
    let response = router
        .oneshot(json_post(
            "/api/validate",
            json!({"version": "1.1", "snippetId": "abc"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn validate_maps_error_result_to_400() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{CONTAINER}/missing")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let router = router_with(&server, StubToolchain::default()).await;
    let response = router
        .oneshot(json_post(
            "/api/validate",
            json!({"version": "1.1", "snippetId": "missing"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lint_stays_200_even_when_pipeline_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{CONTAINER}/missing")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let router = router_with(&server, StubToolchain::default()).await;
    let response = router
        .oneshot(json_post(
            "/api/lint",
            json!({"snippetId": "missing", "config": []}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn run_tests_maps_verdict_to_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{CONTAINER}/abc")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"println(read_input(\"n\"));".to_vec()))
        .mount(&server)
        .await;

    let router = router_with(&server, StubToolchain::default()).await;
    let response = router
        .oneshot(json_post(
            "/api/test/run_tests/abc",
            json!({"id": "t-1", "name": "echo", "input": ["5"], "output": ["5"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn fetch_maps_store_failure_to_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{CONTAINER}/gone")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let router = router_with(&server, StubToolchain::default()).await;
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/fetch/gone")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_ping_answers() {
    let server = MockServer::start().await;
    let router = router_with(&server, StubToolchain::default()).await;
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/health/ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_peer_ping_is_404() {
    let server = MockServer::start().await;
    let router = router_with(&server, StubToolchain::default()).await;
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/com/health/permission/ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn peer_ping_relays_to_configured_peer() {
    let store = MockServer::start().await;
    let peer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&peer)
        .await;

    let service = Arc::new(service_with(&store, StubToolchain::default()));
    let state = AppState::new(service)
        .with_peers([("permission".to_string(), peer.uri())].into_iter().collect());
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/com/health/permission/ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
