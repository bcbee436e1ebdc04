//! Stockroom inventory server
//!
//! Reference backend for the inventory dashboard: an axum REST API over an
//! in-memory ledger of items, warehouses, stores and purchases.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
mod handlers;
pub mod ledger;
mod middleware;
mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use ledger::{Ledger, SharedLedger};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedLedger,
    pub config: Arc<Config>,
}

impl AppState {
    /// Fresh ledger with the configured superuser already registered
    pub async fn bootstrap(config: Config) -> AppResult<Self> {
        let ledger = Ledger::shared();
        let auth = services::AuthService::new(ledger.clone(), &config);
        auth.bootstrap_superuser(
            &config.first_superuser.email,
            &config.first_superuser.password,
        )
        .await?;

        Ok(Self {
            ledger,
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the API on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, create_app(state)).await
}

/// Root endpoint
async fn root() -> &'static str {
    "Stockroom Inventory API v1"
}
