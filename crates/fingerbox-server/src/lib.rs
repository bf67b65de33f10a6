//! # Fingerbox Server
//!
//! HTTP front end for the box generator.
//!
//! - `POST /generate-box` generates a box and stores its SVG, returning the
//!   path it is served under
//! - `GET /output/<file>` serves stored artifacts
//! - `GET /health` liveness probe

pub mod error;
pub mod routes;
pub mod store;

pub use error::{ApiError, ErrorBody};
pub use routes::{ButtJointInfo, GenerateBoxRequest, GenerateBoxResponse, OUTPUT_ROUTE};
pub use store::ArtifactStore;

use axum::routing::{get, post};
use axum::Router;
use fingerbox_joinery::GeneratorSettings;
use fingerbox_settings::Config;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: GeneratorSettings,
    pub store: ArtifactStore,
}

impl AppState {
    pub fn new(settings: GeneratorSettings, store: ArtifactStore) -> Self {
        Self { settings, store }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.generator_settings(),
            ArtifactStore::new(config.server.output_dir.clone()),
        )
    }
}

/// Build the application router.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let output = ServeDir::new(state.store.dir());

    Router::new()
        .route("/generate-box", post(routes::generate_box))
        .route("/health", get(routes::health))
        .nest_service(&format!("/{OUTPUT_ROUTE}"), output)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    request_timeout: Duration,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        output_dir = %state.store.dir().display(),
        "fingerbox server listening"
    );

    axum::serve(listener, router(state, request_timeout))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
