//! Builder handlers: validate, compile, describe, and persist API configs.

use crate::config::{load_api_config_from_value, validate_config, ApiConfig};
use crate::contract::build_contract;
use crate::error::AppError;
use crate::response::{success_one, success_one_ok, success_one_with_meta};
use crate::sql::{compile_sql, extract_join_info_from_sql};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

fn body_to_config(value: Value) -> Result<ApiConfig, AppError> {
    if !value.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    Ok(load_api_config_from_value(value)?)
}

pub async fn validate_api(Json(body): Json<Value>) -> Result<impl axum::response::IntoResponse, AppError> {
    let config = body_to_config(body)?;
    Ok(success_one_ok(validate_config(&config)))
}

pub async fn preview_sql(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let config = body_to_config(body)?;
    let compiled = compile_sql(&config, state.service.options())?;
    let meta = json!({
        "droppedJoins": compiled.dropped_joins.len(),
        "droppedConditions": compiled.dropped_conditions.len(),
    });
    Ok(success_one_with_meta(compiled, meta))
}

pub async fn preview_contract(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let config = body_to_config(body)?;
    Ok(success_one_ok(build_contract(&config, state.service.options())?))
}

/// Body: `{ "sql": "SELECT ..." }`.
pub async fn extract_joins(Json(body): Json<Value>) -> Result<impl axum::response::IntoResponse, AppError> {
    let sql = body
        .get("sql")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::BadRequest("sql is required".into()))?;
    let info = extract_join_info_from_sql(sql)
        .ok_or_else(|| AppError::BadRequest("sql has no FROM clause".into()))?;
    Ok(success_one_ok(info))
}

pub async fn save_endpoint(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let config = body_to_config(body)?;
    Ok(success_one(state.service.save_api(&config).await?))
}

/// Body: `{ "config": {...}, "testParams": {...} }`.
pub async fn test_endpoint(
    State(state): State<AppState>,
    Json(mut body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let config = body
        .get_mut("config")
        .map(Value::take)
        .ok_or_else(|| AppError::BadRequest("config is required".into()))?;
    let config = body_to_config(config)?;
    let test_params = body.get_mut("testParams").map(Value::take).unwrap_or_else(|| json!({}));
    Ok(success_one_ok(state.service.test_api(&config, test_params).await?))
}

pub async fn deploy_endpoint(
    State(state): State<AppState>,
    Path(api_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    Ok(success_one_ok(state.service.deploy_api(&api_id).await?))
}
