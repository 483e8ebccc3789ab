//! HTTP/WebSocket API for the card room server.
//!
//! # Endpoints
//!
//! - `GET /health` - Server health status
//! - `GET /tables` - List open tables
//! - `GET /tables/{table_id}` - One table's metadata
//! - `GET /ws/{table_id}?token=<jwt>` - Take a seat and play over a WebSocket
//!
//! The WebSocket route authenticates through its `token` query parameter;
//! everything else is public.

pub mod rate_limiter;
pub mod tables;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method},
    response::{IntoResponse, Json},
    routing::get,
};
use card_room::{auth::TokenVerifier, table::TableManager};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub table_manager: Arc<TableManager>,
    pub verifier: Arc<TokenVerifier>,
}

/// Create the API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use cr_server::api::{create_router, cors_layer, AppState};
/// # async fn example(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
/// let app = create_router(state, cors_layer(None));
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tables", get(tables::list_tables))
        .route("/tables/{table_id}", get(tables::get_table))
        .route("/ws/{table_id}", get(websocket::websocket_handler))
        .layer(cors)
        .with_state(state)
}

/// CORS for a single allowed origin, or any origin when none is configured.
pub fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET])
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

/// Health check endpoint for monitoring and load balancers.
///
/// ```bash
/// curl http://localhost:6969/health
/// # {"status":"healthy","version":"0.1.0","tables":1}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let tables = state.table_manager.active_table_count().await;

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "tables": tables,
    }))
}
