//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported API kind: {0}")]
    UnsupportedKind(String),
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("strict compilation dropped {joins} join(s) and {conditions} condition(s)")]
    Dropped { joins: usize, conditions: usize },
    #[error("config load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint registry returned {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Config(ConfigError::Validation(_)) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Config(ConfigError::UnsupportedKind(_)) => (StatusCode::UNPROCESSABLE_ENTITY, "unsupported_kind"),
            AppError::Config(ConfigError::Dropped { .. }) => (StatusCode::UNPROCESSABLE_ENTITY, "dropped_items"),
            AppError::Config(ConfigError::Load(_)) => (StatusCode::BAD_REQUEST, "config_error"),
            AppError::Http(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            AppError::Remote { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        };
        let details = match &self {
            AppError::Config(ConfigError::Validation(errors)) => Some(serde_json::json!(errors)),
            AppError::Remote { status, .. } => Some(serde_json::json!({ "status": status })),
            _ => None,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
