//! Dashboard HTTP server
//!
//! Wires the handlers into an axum router and runs it until a shutdown
//! signal arrives on the server's channel.

use axum::{
    Router,
    routing::get,
};
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shared::{ProcessId, logging, process_info};

use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::web::handlers::{api, static_files};

/// Build the router with all routes
pub fn build_router(state: DashboardState) -> Router {
    Router::new()
        // Static file routes
        .route("/", get(static_files::serve_index))
        .route("/static/*path", get(static_files::serve_static))
        // API routes
        .route("/api/reviews", get(api::get_reviews).post(api::submit_review))
        .route("/api/regions", get(api::get_regions))
        .route("/api/analytics", get(api::get_analytics))
        // Health check
        .route("/health", get(api::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Dashboard server owning its state and shutdown channel
pub struct DashboardServer {
    state: DashboardState,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl DashboardServer {
    pub fn new(state: DashboardState) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        Self {
            state,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Sender that stops the server gracefully
    pub fn get_shutdown_sender(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Serve until the shutdown sender fires
    pub async fn run(self, addr: SocketAddr) -> DashboardResult<()> {
        // The server's own sender keeps the channel open while it runs
        let Self {
            state,
            shutdown_tx: _shutdown_tx,
            mut shutdown_rx,
        } = self;
        let router = build_router(state);

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            logging::log_error(ProcessId::current(), "Bind", &e);
            DashboardError::ServerStartupFailed { addr: addr.to_string() }
        })?;

        process_info!(ProcessId::current(), "🌐 Dashboard listening on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}
