//! ApiBuilderService: validate, compile, then hand off to the endpoint registry.

use crate::config::{validate_config, ApiConfig};
use crate::contract::{build_contract, EndpointContract};
use crate::error::AppError;
use crate::service::EndpointRegistry;
use crate::sql::CompileOptions;
use serde_json::{json, Value};
use std::sync::Arc;

/// One per call site; holds no per-build state.
#[derive(Clone)]
pub struct ApiBuilderService {
    registry: Arc<dyn EndpointRegistry>,
    options: CompileOptions,
}

impl ApiBuilderService {
    pub fn new(registry: Arc<dyn EndpointRegistry>) -> Self {
        ApiBuilderService {
            registry,
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Validate and compile without touching the registry.
    pub fn contract(&self, config: &ApiConfig) -> Result<EndpointContract, AppError> {
        validate_config(config).into_result()?;
        Ok(build_contract(config, &self.options)?)
    }

    pub async fn save_api(&self, config: &ApiConfig) -> Result<Value, AppError> {
        let contract = self.contract(config)?;
        let saved = self.registry.save(&contract).await?;
        tracing::info!(api = %contract.name, kind = %contract.kind, "api saved");
        Ok(saved)
    }

    pub async fn test_api(&self, config: &ApiConfig, test_params: Value) -> Result<Value, AppError> {
        validate_config(config).into_result()?;
        let payload = json!({ "config": config, "testParams": test_params });
        self.registry.test(&payload).await
    }

    pub async fn deploy_api(&self, api_id: &str) -> Result<Value, AppError> {
        if api_id.trim().is_empty() {
            return Err(AppError::BadRequest("api id is required".into()));
        }
        let deployed = self.registry.deploy(api_id).await?;
        tracing::info!(api_id = %api_id, "api deployed");
        Ok(deployed)
    }
}
