//! Reqflow API Server
//!
//! Main entry point for the request approval console service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reqflow_api::backend::{BackendClient, HttpBackendClient};
use reqflow_api::{AppState, create_router};
use reqflow_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reqflow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: 15,
    });

    let backend = HttpBackendClient::new(&config.backend)
        .context("Failed to build backend client")?;
    info!(
        base_url = %config.backend.base_url,
        timeout_secs = config.backend.timeout_secs,
        notify_enabled = backend.supports_notify(),
        "Backend client configured"
    );

    let state = AppState {
        jwt_service: Arc::new(jwt_service),
        backend: Arc::new(backend),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
