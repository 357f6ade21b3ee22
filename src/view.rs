//! Dashboard view state
//!
//! The page moves through a small state machine:
//!
//! ```text
//! Loading --(non-empty scores)--> Loaded
//!    |
//!    +----(fetch error)---------> Failed
//! ```
//!
//! `Loaded` and `Failed` are terminal. An empty score sequence leaves the view
//! in `Loading`.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::chart::ChartConfig;
use crate::provider::{FetchError, RiskDataProvider, scores};
use crate::risk::{LegendEntry, legend};

/// Placeholder text shown until data arrives
pub const LOADING_MESSAGE: &str = "Loading data...";

/// Page title
pub const DASHBOARD_TITLE: &str = "Risk Evaluation Dashboard";

/// Current state of the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Loading,
    Loaded(Vec<f64>),
    Failed(FetchError),
}

impl ViewState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }

    /// Apply a fetch outcome. Terminal states ignore further updates.
    ///
    /// Returns whether the state changed.
    pub fn apply(&mut self, outcome: Result<Vec<f64>, FetchError>) -> bool {
        if self.is_terminal() {
            return false;
        }
        match outcome {
            Ok(scores) if scores.is_empty() => false,
            Ok(scores) => {
                *self = ViewState::Loaded(scores);
                true
            }
            Err(e) => {
                *self = ViewState::Failed(e);
                true
            }
        }
    }

    /// What the page shows in this state
    pub fn render(&self) -> Rendering {
        match self {
            ViewState::Loading => Rendering::Placeholder {
                message: LOADING_MESSAGE,
            },
            ViewState::Loaded(scores) => Rendering::Chart {
                chart: Box::new(ChartConfig::for_scores(scores)),
                legend: legend(),
            },
            ViewState::Failed(e) => Rendering::Error {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Renderer-independent output of the view
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Rendering {
    #[serde(rename = "loading")]
    Placeholder { message: &'static str },
    #[serde(rename = "loaded")]
    Chart {
        chart: Box<ChartConfig>,
        legend: Vec<LegendEntry>,
    },
    Error { kind: &'static str, message: String },
}

impl Rendering {
    pub fn is_chart(&self) -> bool {
        matches!(self, Rendering::Chart { .. })
    }
}

/// Owner of the view state and its one-shot data load
pub struct DashboardView {
    state: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl DashboardView {
    /// Mount the view: start in `Loading` and fetch once in the background.
    ///
    /// Must be called inside a tokio runtime. Dropping the view aborts a
    /// fetch that has not completed yet.
    pub fn mount(provider: Arc<dyn RiskDataProvider>) -> Self {
        let (tx, rx) = watch::channel(ViewState::Loading);

        let task = tokio::spawn(async move {
            debug!(provider = provider.name(), "loading risk data");
            let outcome = provider
                .fetch_risk_data()
                .await
                .map(|entries| scores(&entries));

            if let Err(e) = &outcome {
                warn!(provider = provider.name(), error = %e, "risk data fetch failed");
            }

            tx.send_if_modified(|state| state.apply(outcome));
        });

        Self { state: rx, task }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Render the current state
    pub fn render(&self) -> Rendering {
        self.state.borrow().render()
    }

    /// Wait until the view leaves `Loading`.
    ///
    /// Returns the current state if the fetch finished without a transition
    /// (an empty result keeps the view loading).
    pub async fn settled(&mut self) -> ViewState {
        let settled = self
            .state
            .wait_for(ViewState::is_terminal)
            .await
            .map(|state| state.clone())
            .ok();
        settled.unwrap_or_else(|| self.state.borrow().clone())
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::provider::MockRiskProvider;
    use crate::risk::{RiskEntry, RiskTier};

    struct FailingProvider;

    #[async_trait]
    impl RiskDataProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_risk_data(&self) -> Result<Vec<RiskEntry>, FetchError> {
            Err(FetchError::Status(500))
        }
    }

    /// Records whether the fetch ran to completion
    struct TrackingProvider {
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RiskDataProvider for TrackingProvider {
        fn name(&self) -> &'static str {
            "tracking"
        }

        async fn fetch_risk_data(&self) -> Result<Vec<RiskEntry>, FetchError> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            self.finished.store(true, Ordering::SeqCst);
            Ok(vec![RiskEntry::new("Customers", 7.0)])
        }
    }

    #[test]
    fn test_empty_scores_keep_loading() {
        let mut state = ViewState::default();
        assert!(!state.apply(Ok(vec![])));
        assert_eq!(state, ViewState::Loading);
        assert!(!state.render().is_chart());
    }

    #[test]
    fn test_loaded_is_terminal() {
        let mut state = ViewState::Loading;
        assert!(state.apply(Ok(vec![6.6])));
        assert!(!state.apply(Ok(vec![1.0, 2.0])));
        assert!(!state.apply(Err(FetchError::Status(500))));
        assert_eq!(state, ViewState::Loaded(vec![6.6]));
    }

    #[test]
    fn test_failed_renders_error_not_placeholder() {
        let mut state = ViewState::Loading;
        state.apply(Err(FetchError::Malformed("bad".to_string())));

        match state.render() {
            Rendering::Error { kind, message } => {
                assert_eq!(kind, "malformed");
                assert!(message.contains("bad"));
            }
            other => panic!("expected error rendering, got {:?}", other),
        }
    }

    #[test]
    fn test_loading_placeholder_json() {
        let value = serde_json::to_value(ViewState::Loading.render()).unwrap();
        assert_eq!(value["state"], "loading");
        assert_eq!(value["message"], "Loading data...");
    }

    #[test]
    fn test_loaded_renders_chart_and_legend() {
        let state = ViewState::Loaded(vec![6.6, 6.3, 5.7, 4.0, 5.3]);
        match state.render() {
            Rendering::Chart { chart, legend } => {
                assert_eq!(chart.bar_count(), 5);
                assert_eq!(chart.data.datasets[0].tiers[0], RiskTier::High);
                assert_eq!(legend.len(), 3);
            }
            other => panic!("expected chart rendering, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_starts_loading_then_loads() {
        let mut view = DashboardView::mount(Arc::new(MockRiskProvider::default()));
        assert_eq!(view.state(), ViewState::Loading);

        let state = view.settled().await;
        assert_eq!(state, ViewState::Loaded(vec![6.6, 6.3, 5.7, 4.0, 5.3]));
        assert!(view.render().is_chart());
    }

    #[tokio::test]
    async fn test_mount_surfaces_failure() {
        let mut view = DashboardView::mount(Arc::new(FailingProvider));
        assert_eq!(view.settled().await, ViewState::Failed(FetchError::Status(500)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_with_empty_data_stays_loading() {
        let provider = MockRiskProvider::with_entries(Duration::from_millis(10), vec![]);
        let mut view = DashboardView::mount(Arc::new(provider));
        assert_eq!(view.settled().await, ViewState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_fetch() {
        let finished = Arc::new(AtomicBool::new(false));
        let view = DashboardView::mount(Arc::new(TrackingProvider {
            finished: finished.clone(),
        }));

        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(view);
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(!finished.load(Ordering::SeqCst));
    }
}
