mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{MonthQuery, SalesQuery};

use crate::provider::DataProvider;

use axum::{http::Method, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub struct AppState<P> {
    pub provider: Arc<P>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

pub fn router<P: DataProvider>(provider: P) -> Router {
    let state = AppState {
        provider: Arc::new(provider),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/sales", get(handlers::sales::<P>))
        .route("/statistics", get(handlers::statistics::<P>))
        .route("/items", get(handlers::items::<P>))
        .route("/categories", get(handlers::categories::<P>))
        .route("/all-statistics", get(handlers::all_statistics::<P>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server<P: DataProvider>(provider: P, addr: SocketAddr) -> std::io::Result<()> {
    info!(source = %provider.describe(), "serving sale records");
    let app = router(provider);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
