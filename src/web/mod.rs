//! Web dashboard
//!
//! Serves the dashboard page and the JSON it renders:
//! - the chart configuration (bars colored by risk tier, fixed 0..10 axis)
//! - the static three-entry legend
//! - the raw risk entries from the configured provider

pub mod routes;
pub mod server;

pub use server::{AppState, ServerConfig, app, start_server};
