//! # risk-dashboard - Risk Evaluation Dashboard
//!
//! Fetches per-category risk scores and renders them as a bar chart with a
//! color-coded legend, in the terminal or as a web page.
//!
//! ## Usage
//!
//! ```bash
//! # Fetch the sample assessment and print it
//! risk-dashboard
//!
//! # Serve the interactive dashboard
//! risk-dashboard --web --port 3000
//!
//! # Read scores from a real endpoint
//! risk-dashboard --endpoint https://example.com/api/risk
//! ```
//!
//! ## Risk Tiers
//!
//! ```text
//! score >= 6.6        High    red    Strong need for innovation
//! 5.0 <= score < 6.6  Medium  amber  Need for innovation
//! score < 5.0         Low     teal   Low need for innovation
//! ```
//!
//! The chart's y axis is always 0..10; scores outside that range are still
//! classified by the thresholds above.

pub mod chart;
pub mod config;
pub mod provider;
pub mod render;
pub mod risk;
pub mod view;
pub mod web;

pub use chart::{ChartConfig, DATASET_LABEL};
pub use config::{ConfigError, DashboardConfig, ProviderConfig, ServerSection, load_config};
pub use provider::{
    FetchError, HttpRiskProvider, MockRiskProvider, RiskDataProvider, scores,
};
pub use render::{generate_json_output, generate_text_output};
pub use risk::{
    Category, HIGH_RISK_THRESHOLD, LegendEntry, MEDIUM_RISK_THRESHOLD, RiskEntry, RiskTier,
    format_bar_label, format_tooltip_label, legend, sample_entries,
};
pub use view::{DashboardView, Rendering, ViewState};
