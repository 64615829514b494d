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

//! Transport layer: maps the pipeline's result records onto HTTP statuses
//! (200 for a populated payload, 400 for a populated error, 500 for
//! handler-level faults). Requests arrive already authenticated; identity
//! is the host's concern.

use crate::pipeline::{SnippetService, DEFAULT_VERSION};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use quill_contracts::{FormatRequest, LintRequest, TestCase, ValidateRequest};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SnippetService>,
    /// Peer name to base URL, for the communication health probes.
    pub peers: HashMap<String, String>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(service: Arc<SnippetService>) -> Self {
        Self {
            service,
            peers: HashMap::new(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_peers(mut self, peers: HashMap<String, String>) -> Self {
        self.peers = peers;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/validate", post(validate_snippet))
        .route("/api/execute", post(execute_snippet))
        .route("/api/lint", post(lint_snippet))
        .route("/api/format", post(format_snippet))
        .route("/api/fetch/{snippet_id}", get(fetch_snippet))
        .route("/api/test/run_tests/{snippet_id}", post(run_tests))
        .route("/api/health/ping", get(health_ping))
        .route("/api/com/health/{peer}/ping", get(peer_ping))
        .with_state(state)
}

async fn validate_snippet(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Response {
    info!(request_id = %Uuid::new_v4(), snippet_id = %request.snippet_id, "Validate request");
    let result = state
        .service
        .validate(&request.version, &request.snippet_id)
        .await;
    if result.error.is_some() {
        (StatusCode::BAD_REQUEST, Json(result)).into_response()
    } else {
        Json(result).into_response()
    }
}

async fn execute_snippet(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Response {
    info!(request_id = %Uuid::new_v4(), snippet_id = %request.snippet_id, "Execute request");
    let result = state
        .service
        .execute(&request.version, &request.snippet_id)
        .await;
    if result.error.is_some() {
        (StatusCode::BAD_REQUEST, Json(result)).into_response()
    } else {
        Json(result).into_response()
    }
}

async fn lint_snippet(
    State(state): State<AppState>,
    Json(request): Json<LintRequest>,
) -> Response {
    info!(request_id = %Uuid::new_v4(), snippet_id = %request.snippet_id, "Lint request");
    // Lint never reports transport-level failure: errors degrade to an
    // empty diagnostics list inside the pipeline.
    let diagnostics = state
        .service
        .lint(&request.snippet_id, &request.config)
        .await;
    Json(diagnostics).into_response()
}

async fn format_snippet(
    State(state): State<AppState>,
    Json(request): Json<FormatRequest>,
) -> Response {
    info!(request_id = %Uuid::new_v4(), snippet_id = %request.snippet_id, "Format request");
    let result = state
        .service
        .format(&request.snippet_id, &request.config)
        .await;
    if result.error.is_some() {
        (StatusCode::BAD_REQUEST, Json(result)).into_response()
    } else {
        Json(result).into_response()
    }
}

async fn fetch_snippet(
    State(state): State<AppState>,
    Path(snippet_id): Path<String>,
) -> Response {
    match state.service.fetch_source(&snippet_id).await {
        Ok(source) => source.into_response(),
        Err(err) => {
            error!(snippet_id = %snippet_id, error = %err, "Fetch failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn run_tests(
    State(state): State<AppState>,
    Path(snippet_id): Path<String>,
    Json(case): Json<TestCase>,
) -> Response {
    info!(
        request_id = %Uuid::new_v4(),
        snippet_id = %snippet_id,
        test = case.name.as_deref().unwrap_or("unnamed"),
        "Test run request"
    );
    let result = state
        .service
        .run_test(DEFAULT_VERSION, &snippet_id, &case)
        .await;
    if result.error.is_some() {
        (StatusCode::BAD_REQUEST, Json(result)).into_response()
    } else {
        Json(result).into_response()
    }
}

async fn health_ping() -> &'static str {
    "pong"
}

async fn peer_ping(State(state): State<AppState>, Path(peer): Path<String>) -> Response {
    let Some(base_url) = state.peers.get(&peer) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let url = format!("{base_url}/api/health/ping");
    match state.http.get(&url).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(body) => body.into_response(),
            Err(_) => "No response".to_string().into_response(),
        },
        Ok(_) | Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{peer} service is down"),
        )
            .into_response(),
    }
}
