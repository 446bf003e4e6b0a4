//! Cascade HTTP server.
//!
//! Reads configuration from environment variables (see [`config::Config`]),
//! wires a [`RemoteEngine`] and a bounded in-memory session store into the
//! request translator, then serves the JSON API until SIGINT.
//!
//! ```bash
//! # Development (local engine on :5002, port 5001, info log)
//! cargo run --bin cascade-server --release
//!
//! # Custom config
//! CASCADE_PORT=8021 \
//! CASCADE_ENGINE_URL=http://engine:5002 \
//! CASCADE_CORS_ORIGINS=http://localhost:8021 \
//!   cargo run --bin cascade-server --release
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use cascade_api::{router, AppState, OperationMetrics, Translator};
use cascade_engine::RemoteEngine;
use cascade_session::InMemorySessionStore;

mod config;
use config::Config;

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    info!(
        engine_url = %config.engine_url,
        session_capacity = config.session_capacity,
        "starting cascade server"
    );

    let engine = Arc::new(RemoteEngine::new(&config.engine_url));
    let sessions = Arc::new(InMemorySessionStore::with_capacity(config.session_capacity));
    let translator = Arc::new(Translator::new(engine, sessions));
    let metrics = Arc::new(OperationMetrics::new());

    let app = router(AppState { translator, metrics }).layer(cors_layer(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "cascade listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
