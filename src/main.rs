//! overlay-gateway server entry point.
//!
//! Starts the Axum HTTP server with the upload, lookup and image endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use overlay_gateway::api;
use overlay_gateway::app_state::AppState;
use overlay_gateway::config::ServerConfig;
use overlay_gateway::domain::StoreId;
use overlay_gateway::persistence::{
    ConfigurationStore, InMemoryConfigurationStore, PostgresConfigurationStore,
};
use overlay_gateway::service::OverlayService;
use overlay_gateway::storage::ImageStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting overlay-gateway");

    // Build persistence layer
    let store: Arc<dyn ConfigurationStore> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        let store = PostgresConfigurationStore::new(pool);
        store.migrate().await?;
        tracing::info!("using PostgreSQL configuration store");
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled; configurations are kept in memory");
        Arc::new(InMemoryConfigurationStore::new())
    };

    // Build service layer
    let images = ImageStorage::new(&config.upload_dir, config.max_upload_bytes);
    tokio::fs::create_dir_all(images.root()).await?;
    let overlay_service = Arc::new(OverlayService::new(store, images.clone()));

    // Build application state
    let app_state = AppState {
        overlay_service,
        default_store_id: StoreId::new(config.default_store_id.clone()),
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router(&images))
        .merge(swagger_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "swagger-ui")]
fn swagger_router() -> Router<AppState> {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn swagger_router() -> Router<AppState> {
    Router::new()
}
