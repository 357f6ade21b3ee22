//! Web server for the risk dashboard
//!
//! Provides an HTTP server using Axum to serve the dashboard UI
//! and JSON API endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::provider::RiskDataProvider;

use super::routes;

/// Shared application state
pub struct AppState {
    pub provider: Arc<dyn RiskDataProvider>,
    pub api_endpoint: Option<String>,
}

/// Configuration for the web server
pub struct ServerConfig {
    pub port: u16,
    pub open_browser: bool,
    pub api_endpoint: Option<String>,
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .merge(routes::api_routes())
        .merge(routes::static_routes());

    // A frontend deployed elsewhere calls the API cross-origin
    let router = if state.api_endpoint.is_some() {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Start the web server and serve the dashboard
pub async fn start_server(
    provider: Arc<dyn RiskDataProvider>,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState {
        provider,
        api_endpoint: config.api_endpoint.clone(),
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;

    let url = format!("http://localhost:{}", config.port);
    info!(%url, provider = state.provider.name(), "starting web server");

    if config.open_browser {
        info!("opening browser");
        if let Err(e) = open::that(&url) {
            warn!(error = %e, "could not open browser, please open {} manually", url);
        }
    }

    eprintln!("Dashboard available at {}. Press Ctrl+C to stop the server", url);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
