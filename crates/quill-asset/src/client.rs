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

use async_trait::async_trait;
use quill_contracts::ServiceError;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Asset store returned status {status} for snippet {snippet_id}")]
    Status { status: u16, snippet_id: String },

    #[error("Asset store returned no body for snippet {0}")]
    EmptyBody(String),
}

pub type AssetResult<T> = Result<T, AssetError>;

impl From<AssetError> for ServiceError {
    fn from(err: AssetError) -> Self {
        ServiceError::AssetUnavailable(err.to_string())
    }
}

/// Byte-oriented get/put boundary of the remote content store. No
/// transactional semantics are assumed.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn get_snippet(&self, snippet_id: &str) -> AssetResult<Vec<u8>>;

    async fn put_snippet(&self, snippet_id: &str, bytes: Vec<u8>) -> AssetResult<()>;
}

#[derive(Debug, Clone)]
pub struct AssetClient {
    client: Client,
    base_url: String,
    container: String,
}

impl AssetClient {
    pub fn new(
        base_url: impl Into<String>,
        container: impl Into<String>,
        timeout_seconds: Option<u32>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.unwrap_or(30).into()))
            .build()
            .expect("Failed to create HTTP client");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client,
            base_url,
            container: container.into(),
        }
    }

    fn snippet_url(&self, snippet_id: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.container, snippet_id)
    }
}

#[async_trait]
impl AssetStore for AssetClient {
    async fn get_snippet(&self, snippet_id: &str) -> AssetResult<Vec<u8>> {
        let url = self.snippet_url(snippet_id);
        debug!(snippet_id = snippet_id, url = %url, "Fetching snippet");

        let response = self
            .client
            .get(&url)
            .header("accept", "application/octet-stream")
            .send()
            .await
            .map_err(|e| {
                error!(snippet_id = snippet_id, error = %e, "Failed to retrieve snippet");
                AssetError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(snippet_id = snippet_id, status = status.as_u16(), "Failed to retrieve snippet");
            return Err(AssetError::Status {
                status: status.as_u16(),
                snippet_id: snippet_id.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AssetError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Err(AssetError::EmptyBody(snippet_id.to_string()));
        }

        Ok(bytes.to_vec())
    }

    async fn put_snippet(&self, snippet_id: &str, bytes: Vec<u8>) -> AssetResult<()> {
        let url = self.snippet_url(snippet_id);
        debug!(snippet_id = snippet_id, url = %url, size = bytes.len(), "Saving snippet");

        let response = self
            .client
            .put(&url)
            .header("accept", "*/*")
            .header("content-type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                error!(snippet_id = snippet_id, error = %e, "Failed to save snippet");
                AssetError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(snippet_id = snippet_id, status = status.as_u16(), "Failed to save snippet");
            return Err(AssetError::Status {
                status: status.as_u16(),
                snippet_id: snippet_id.to_string(),
            });
        }

        Ok(())
    }
}
