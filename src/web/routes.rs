//! HTTP routes for the web dashboard
//!
//! Provides API endpoints for risk data and static file serving.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use rust_embed::RustEmbed;
use serde::Serialize;

use super::server::AppState;
use crate::provider::{FetchError, scores};
use crate::risk::{LegendEntry, legend};
use crate::view::ViewState;

/// Embedded static assets
#[derive(RustEmbed)]
#[folder = "web-assets/"]
struct Assets;

/// Frontend configuration
#[derive(Serialize)]
struct FrontendConfig {
    api_endpoint: Option<String>,
}

/// Error body of a failed fetch
#[derive(Serialize)]
struct FetchErrorResponse {
    error: String,
    kind: &'static str,
}

fn fetch_error_response(error: &FetchError) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(FetchErrorResponse {
            error: error.to_string(),
            kind: error.kind(),
        }),
    )
        .into_response()
}

/// Create API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/risk", get(get_risk))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/legend", get(get_legend))
        .route("/api/config", get(get_config))
        .route("/api/health", get(health_check))
}

/// Create static file routes
pub fn static_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_html))
        .route("/{*path}", get(static_handler))
}

/// GET /api/risk - Returns the provider's risk entries
async fn get_risk(State(state): State<Arc<AppState>>) -> Response {
    match state.provider.fetch_risk_data().await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => fetch_error_response(&e),
    }
}

/// GET /api/dashboard - Returns the rendered view (chart and legend)
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Response {
    let outcome = state
        .provider
        .fetch_risk_data()
        .await
        .map(|entries| scores(&entries));

    let mut view = ViewState::Loading;
    view.apply(outcome);

    let status = match view {
        ViewState::Failed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    (status, Json(view.render())).into_response()
}

/// GET /api/legend - Returns the static legend
async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(legend())
}

/// GET /api/config - Returns frontend configuration
async fn get_config(State(state): State<Arc<AppState>>) -> Json<FrontendConfig> {
    Json(FrontendConfig {
        api_endpoint: state.api_endpoint.clone(),
    })
}

/// GET /api/health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// GET / - Serve index.html
async fn index_html() -> impl IntoResponse {
    match Assets::get("index.html") {
        Some(content) => Html(content.data.into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, "index.html not found").into_response(),
    }
}

/// Static file handler for embedded assets
async fn static_handler(
    axum::extract::Path(path): axum::extract::Path<String>,
) -> impl IntoResponse {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("File not found: {}", path)).into_response(),
    }
}
