mod error;
mod handlers;
mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use log::{info, warn};

use crate::core::TraceError;
use crate::service::TraceService;

pub struct TraceApi {
    service: Arc<TraceService>,
}

impl TraceApi {
    pub fn new(service: TraceService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/result/", post(handlers::result))
            .route("/health", get(handlers::health))
            .with_state(self.service.clone())
    }

    /// Serves until ctrl-c, then closes the store.
    pub async fn serve(self, addr: &str) -> Result<(), TraceError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| TraceError::IoError(format!("binding to {addr}: {e}")))?;
        info!("listening on {addr}");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TraceError::IoError(format!("serving: {e}")))?;
        self.service.close().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
    }
}
