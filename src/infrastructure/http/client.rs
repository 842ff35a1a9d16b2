// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::config::{AuthScheme, ClientConfig, Credentials};
use crate::infrastructure::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, USER_AGENT_NAME};
use crate::infrastructure::http::endpoint::ensure_depth;
use crate::shared::error::{CloudError, Result};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Failure of a single poll fetch. The poll loop treats every variant as
/// transient; the status code is kept so a deletion wait can spot a 404.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One authenticated GET of a fully resolved URL. Implementations ask for
/// the expanded representation unless the URL already names a depth.
#[async_trait::async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<Value, FetchError>;
}

/// Decoded response of a command-layer call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// `<product>_cloudctl/<version>`, or just `cloudctl/<version>`.
pub fn user_agent(product: Option<&str>) -> String {
    let sdk = format!("{}/{}", USER_AGENT_NAME, env!("CARGO_PKG_VERSION"));
    match product.filter(|p| !p.is_empty()) {
        Some(product) => format!("{}_{}", product, sdk),
        None => sdk,
    }
}

pub struct CloudHttpClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl CloudHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(std::time::Duration::from_secs(
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )))
            .user_agent(user_agent(config.user_agent_product.as_deref()))
            .build()
            .map_err(|e| CloudError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            credentials: config.credentials.clone(),
        })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.scheme() {
            AuthScheme::Bearer(token) => builder.bearer_auth(token),
            AuthScheme::Basic { username, password } => builder.basic_auth(username, Some(password)),
            AuthScheme::Anonymous => builder,
        }
    }

    /// Issue a command-layer call. Non-2xx answers become
    /// [`CloudError::Status`]; an empty body decodes to `null`.
    pub async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<ApiResponse> {
        debug!(%method, url, "sending request");
        let mut builder = self.authorize(self.http.request(method.clone(), url));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(CloudError::status(method.as_str(), url, status.as_u16(), text));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        self.send(Method::GET, url, None).await
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn put(&self, url: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn patch(&self, url: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::PATCH, url, Some(body)).await
    }

    pub async fn delete(&self, url: &str) -> Result<ApiResponse> {
        self.send(Method::DELETE, url, None).await
    }
}

#[async_trait::async_trait]
impl ResourceFetcher for CloudHttpClient {
    async fn fetch(&self, url: &str) -> std::result::Result<Value, FetchError> {
        let url = ensure_depth(url).map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let url = url.as_str();

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
