//! HTTP server for the agent.
//!
//! Serves the SWML document and the SWAIG webhook behind basic auth, plus
//! unauthenticated health and readiness probes.

mod auth;
mod handlers;

pub use auth::BasicAuth;
pub use handlers::webhook_url;

use crate::agent::AgentBase;
use crate::error::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state.
pub struct AppState {
    pub agent: AgentBase,
}

impl AppState {
    pub fn new(agent: AgentBase) -> Arc<Self> {
        Arc::new(Self { agent })
    }
}

/// Build the router for an agent.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(state.agent.route(), get(handlers::swml).post(handlers::swml))
        .route(&state.agent.swaig_route(), post(handlers::swaig))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(agent: AgentBase) -> Result<()> {
    let server = &agent.settings().server;
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        agent = agent.name(),
        route = agent.route(),
        "Listening on http://{}",
        addr
    );

    let app = router(AppState::new(agent));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
