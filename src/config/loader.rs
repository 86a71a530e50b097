//! Load API configs from JSON text or files.

use crate::config::ApiConfig;
use crate::error::ConfigError;
use std::path::Path;

pub fn load_api_config_from_str(json: &str) -> Result<ApiConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
}

pub fn load_api_config_from_value(value: serde_json::Value) -> Result<ApiConfig, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Read one config document from disk.
pub async fn load_api_config_from_path(path: impl AsRef<Path>) -> Result<ApiConfig, ConfigError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading api config");
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    load_api_config_from_str(&text)
}
