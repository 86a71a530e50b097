//! API builder SDK: compiles table/join/filter configs into SQL and endpoint contracts.

pub mod config;
pub mod contract;
pub mod error;
pub mod response;
pub mod sql;
pub mod state;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::{
    load_api_config_from_path, load_api_config_from_str, validate_config, ApiConfig, ApiConfigBuilder, ApiKind,
    FieldRef, FilterCondition, JoinCondition, JoinGraph, JoinKind, JoinSpec, Settings, ValidationReport,
};
pub use contract::{build_contract, EndpointContract, ParamSpec};
pub use error::{AppError, ConfigError};
pub use response::{success_one, success_one_ok};
pub use sql::{
    compile_sql, extract_join_info_from_sql, generate_sql, normalize_joins, CompileOptions, CompiledSql, JoinInfo,
    LiteralMode, SkipPolicy,
};
pub use state::AppState;
pub use routes::{builder_routes, common_routes};
pub use service::{ApiBuilderService, EndpointRegistry, HttpEndpointRegistry};
