// Server module - wires configuration, database, provider and router together

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::infrastructure::config::Config;
use crate::infrastructure::session::SessionKeys;
use crate::infrastructure::{AppState, db, seed};
use crate::modules::integrations::GoogleBooksClient;

/// Full application router with request tracing
pub fn build_router(state: AppState) -> Router {
    api::router(state).layer(TraceLayer::new_for_http())
}

/// Build the shared state from configuration: database bootstrap and provider client
pub async fn build_state(config: &Config) -> Result<AppState, String> {
    let conn = db::init_db(&config.database_url)
        .await
        .map_err(|e| format!("Failed to initialize database: {}", e))?;

    let provider = GoogleBooksClient::new(config.books_api_url.clone(), config.lookup_timeout)
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    Ok(AppState::new(
        conn,
        Arc::new(provider),
        SessionKeys::new(&config.session_secret),
    ))
}

pub async fn run(config: Config) -> Result<(), String> {
    let state = build_state(&config).await?;

    if config.seed_demo {
        tracing::info!("Seeding demo user...");
        if let Err(e) = seed::seed_demo_user(state.user_repo.as_ref()).await {
            tracing::error!("Failed to seed demo user: {}", e);
        }
    }

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Bookshelf server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("HTTP server error: {}", e))
}
