//! # VerseLight API Server
//!
//! REST API consumed by the VerseLight browser client.
//!
//! ## Endpoints
//!
//! - `POST /api/validate-verse` - Resolve a reference and fetch its text
//! - `POST /api/explain` - Five-bullet explanation
//! - `POST /api/context` - Historical and literary context
//! - `POST /api/crossref` - Typed cross-references
//! - `POST /api/translate` - Greek/Hebrew word breakdown
//! - `POST /api/youtube` - Related videos
//! - `GET /api/health` - Liveness
//! - `GET /api/cache/stats` - Response cache size
//!
//! ## Example
//!
//! ```rust,ignore
//! use verselight_api::{ApiConfig, ApiServer};
//!
//! let config = ApiConfig::from_env();
//! let addr = config.socket_addr()?;
//! let server = ApiServer::new(config)?;
//! server.run(addr).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::watch;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use verselight_cache::spawn_sweeper;
use verselight_core::error::Result;

use crate::error::PanicResponder;

/// API server for VerseLight.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_state(Arc::new(AppState::new(config)?)))
    }

    /// Creates a server over existing state.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Shared handler state.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Creates the router with all routes and layers configured.
    ///
    /// With `static_dir` set, non-API paths are served from it and unknown
    /// paths fall back to its `index.html`.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let mut router = create_router(self.state.clone());
        if let Some(dir) = &self.state.config.static_dir {
            let index = ServeFile::new(dir.join("index.html"));
            router = router.fallback_service(ServeDir::new(dir).fallback(index));
        }

        router
            .layer(CatchPanicLayer::custom(PanicResponder {
                diagnostic: self.state.config.diagnostic,
            }))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address until Ctrl-C.
    ///
    /// The cache sweeper runs for the lifetime of the server.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper = spawn_sweeper(
            self.state.cache().clone(),
            self.state.cache().config().sweep_interval(),
            shutdown_rx,
        );

        info!("VerseLight API server listening on {}", addr);
        if self.state.config.diagnostic {
            warn!("Diagnostic mode: panic messages are returned to clients");
        }

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await;

        let _ = shutdown_tx.send(true);
        let _ = sweeper.await;
        info!("Server stopped");
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
