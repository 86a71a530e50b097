//! Example consumer: serves the builder routes backed by the HTTP endpoint registry.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Set `API_BUILDER_BASE_URL` to point at the registry.

use api_builder_sdk::{builder_routes, common_routes, ApiBuilderService, AppState, HttpEndpointRegistry, Settings};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("api_builder_sdk=info")),
        )
        .init();

    let settings = Settings::from_env();
    let registry = HttpEndpointRegistry::from_settings(&settings)?;
    tracing::info!(registry = %registry.base_url(), "using endpoint registry");
    let state = AppState::new(ApiBuilderService::new(Arc::new(registry)));

    let app = Router::new()
        .merge(common_routes())
        .nest("/api/v1", builder_routes(state));

    let listener = TcpListener::bind(settings.bind_addr.as_str()).await?;
    tracing::info!("Example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
