//! Builder routes: compile previews plus registry pass-through.

use crate::handlers::builder::{
    deploy_endpoint, extract_joins, preview_contract, preview_sql, save_endpoint, test_endpoint, validate_api,
};
use crate::state::AppState;
use axum::{routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// Configs are small; anything past this is a client bug.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn builder_routes(state: AppState) -> Router {
    Router::new()
        .route("/builder/validate", post(validate_api))
        .route("/builder/sql", post(preview_sql))
        .route("/builder/contract", post(preview_contract))
        .route("/builder/extract", post(extract_joins))
        .route("/builder/endpoints", post(save_endpoint))
        .route("/builder/endpoints/test", post(test_endpoint))
        .route("/builder/endpoints/:api_id/deploy", post(deploy_endpoint))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
