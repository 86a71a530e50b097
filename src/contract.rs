//! Endpoint contract: the compiled SQL plus the parameters callers pass to run it.

use crate::config::{ApiConfig, ApiKind};
use crate::error::ConfigError;
use crate::sql::{compile_sql, CompileOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub required: bool,
    pub default_value: Value,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointContract {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ApiKind,
    pub description: String,
    pub main_table: String,
    pub sql: String,
    pub parameters: Vec<ParamSpec>,
}

/// Parameters in contract order: parameterized conditions, then `page`/`limit`, then
/// `sort_field`/`sort_direction` for queries; one per field for inserts.
pub fn build_parameters(config: &ApiConfig) -> Vec<ParamSpec> {
    match config.kind {
        Some(ApiKind::Query) => query_parameters(config),
        Some(ApiKind::Insert) => insert_parameters(config),
        _ => Vec::new(),
    }
}

fn query_parameters(config: &ApiConfig) -> Vec<ParamSpec> {
    let mut params: Vec<ParamSpec> = config
        .conditions
        .iter()
        .filter(|c| c.parameterized && !c.field.is_empty())
        .map(|c| ParamSpec {
            name: c.param_name_or_field().to_string(),
            type_: c.param_type.clone().unwrap_or_else(|| "string".into()),
            required: c.required.unwrap_or(false),
            default_value: c.default_value.clone().unwrap_or(Value::Null),
            description: c
                .description
                .clone()
                .unwrap_or_else(|| format!("Filter by {}", c.field)),
        })
        .collect();

    if let Some(p) = config.pagination.as_ref().filter(|p| p.enabled) {
        params.push(ParamSpec {
            name: "page".into(),
            type_: "integer".into(),
            required: false,
            default_value: Value::from(1),
            description: "Page number".into(),
        });
        params.push(ParamSpec {
            name: "limit".into(),
            type_: "integer".into(),
            required: false,
            default_value: Value::from(p.page_size),
            description: "Number of records per page".into(),
        });
    }

    if let Some(s) = config.sorting.as_ref().filter(|s| s.enabled) {
        params.push(ParamSpec {
            name: "sort_field".into(),
            type_: "string".into(),
            required: false,
            default_value: s.default_field.clone().map(Value::String).unwrap_or(Value::Null),
            description: "Field to sort by".into(),
        });
        params.push(ParamSpec {
            name: "sort_direction".into(),
            type_: "string".into(),
            required: false,
            default_value: Value::String(s.direction.clone()),
            description: "Sort direction (asc or desc)".into(),
        });
    }
    params
}

fn insert_parameters(config: &ApiConfig) -> Vec<ParamSpec> {
    config
        .fields
        .iter()
        .map(|f| ParamSpec {
            name: f.name.clone(),
            type_: f.type_.clone().unwrap_or_else(|| "string".into()),
            required: f.required != Some(false),
            default_value: f.default_value.clone().unwrap_or(Value::Null),
            description: f
                .description
                .clone()
                .unwrap_or_else(|| format!("Value for {}", f.name)),
        })
        .collect()
}

/// Compile and describe the endpoint. Fails only where SQL compilation fails.
pub fn build_contract(config: &ApiConfig, options: &CompileOptions) -> Result<EndpointContract, ConfigError> {
    let compiled = compile_sql(config, options)?;
    let kind = config
        .kind
        .ok_or_else(|| ConfigError::UnsupportedKind("none".into()))?;
    Ok(EndpointContract {
        name: config.name.clone(),
        kind,
        description: config.description.clone(),
        main_table: config.main_table.clone(),
        sql: compiled.sql,
        parameters: build_parameters(config),
    })
}
