//! Endpoint registry: where compiled contracts are stored, trial-run, and deployed.

use crate::config::Settings;
use crate::contract::EndpointContract;
use crate::error::{AppError, ConfigError};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

#[async_trait]
pub trait EndpointRegistry: Send + Sync {
    async fn save(&self, contract: &EndpointContract) -> Result<Value, AppError>;

    /// `payload` is `{ "config": ..., "testParams": ... }`.
    async fn test(&self, payload: &Value) -> Result<Value, AppError>;

    async fn deploy(&self, api_id: &str) -> Result<Value, AppError>;
}

/// Registry reached over HTTP at `{base_url}/endpoints`.
pub struct HttpEndpointRegistry {
    client: Client,
    base_url: String,
}

impl HttpEndpointRegistry {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpEndpointRegistry { client, base_url }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;
        Ok(Self::new(client, settings.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/<segments...>`, each segment percent-encoded on its own.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let invalid = |detail: String| AppError::Config(ConfigError::Load(format!("invalid registry base url: {}", detail)));
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_json<T: serde::Serialize + ?Sized>(&self, segments: &[&str], body: Option<&T>) -> Result<Value, AppError> {
        let url = self.endpoint_url(segments)?;
        tracing::debug!(url = %url, "registry request");
        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status = status.as_u16(), "registry request failed");
            return Err(AppError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "registry returned invalid JSON");
            AppError::Remote {
                status: status.as_u16(),
                body: text,
            }
        })
    }
}

#[async_trait]
impl EndpointRegistry for HttpEndpointRegistry {
    async fn save(&self, contract: &EndpointContract) -> Result<Value, AppError> {
        self.post_json(&["endpoints"], Some(contract)).await
    }

    async fn test(&self, payload: &Value) -> Result<Value, AppError> {
        self.post_json(&["endpoints", "test"], Some(payload)).await
    }

    async fn deploy(&self, api_id: &str) -> Result<Value, AppError> {
        if api_id.is_empty() || api_id == "." || api_id == ".." || api_id.contains('/') {
            return Err(AppError::BadRequest(format!("invalid api id `{}`", api_id)));
        }
        self.post_json::<Value>(&["endpoints", api_id, "deploy"], None).await
    }
}
