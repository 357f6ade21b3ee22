//! Bar chart configuration
//!
//! Builds the `{ type, data, options }` object consumed by Chart.js (with the
//! datalabels plugin). Callback formatters cannot travel through JSON, so the
//! per-bar annotation and tooltip strings are precomputed here and the
//! frontend only looks them up by index.

use serde::Serialize;

use crate::risk::{Category, MAX_SCORE, RiskTier, format_bar_label, format_tooltip_label};

/// Label of the single dataset
pub const DATASET_LABEL: &str = "Risk Levels";

/// Complete chart configuration
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

/// One bar dataset with per-bar colors
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
    pub border_radius: u32,
    pub bar_percentage: f64,
    pub category_percentage: f64,
    /// Value annotation per bar (one decimal)
    pub bar_labels: Vec<String>,
    /// Tooltip text per bar (two decimals)
    pub tooltip_labels: Vec<String>,
    /// Tier per bar, for consumers that do not re-classify
    pub tiers: Vec<RiskTier>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub index_axis: &'static str,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub animation: Animation,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, Serialize)]
pub struct Animation {
    pub duration: u32,
    pub easing: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plugins {
    pub legend: Toggle,
    pub tooltip: TooltipOptions,
    pub datalabels: DataLabelOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    pub enabled: bool,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataLabelOptions {
    pub anchor: &'static str,
    pub align: &'static str,
    pub color: &'static str,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub ticks: Ticks,
    pub grid: Toggle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl ChartConfig {
    /// Build the bar chart for an ordered score sequence.
    ///
    /// The y axis is pinned to `0..=10` whatever the scores are.
    pub fn for_scores(scores: &[f64]) -> Self {
        let tiers: Vec<RiskTier> = scores.iter().map(|&s| RiskTier::classify(s)).collect();

        let dataset = Dataset {
            label: DATASET_LABEL,
            data: scores.to_vec(),
            background_color: tiers.iter().map(RiskTier::fill_color).collect(),
            border_color: tiers.iter().map(RiskTier::border_color).collect(),
            border_width: 1,
            border_radius: 15,
            bar_percentage: 0.4,
            category_percentage: 0.5,
            bar_labels: scores.iter().map(|&s| format_bar_label(s)).collect(),
            tooltip_labels: scores
                .iter()
                .map(|&s| format_tooltip_label(DATASET_LABEL, Some(s)))
                .collect(),
            tiers,
        };

        Self {
            chart_type: "bar",
            data: ChartData {
                labels: Category::ALL.iter().map(Category::label).collect(),
                datasets: vec![dataset],
            },
            options: ChartOptions::default(),
        }
    }

    /// Number of bars drawn: one per score that has a category slot
    pub fn bar_count(&self) -> usize {
        self.data
            .datasets
            .first()
            .map(|d| d.data.len().min(self.data.labels.len()))
            .unwrap_or(0)
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            index_axis: "x",
            responsive: true,
            maintain_aspect_ratio: false,
            animation: Animation {
                duration: 1000,
                easing: "easeInOutQuad",
            },
            plugins: Plugins {
                legend: Toggle { display: false },
                tooltip: TooltipOptions {
                    enabled: true,
                    background_color: "rgba(0, 0, 0, 0.7)",
                    border_color: "#fff",
                    border_width: 1,
                },
                datalabels: DataLabelOptions {
                    anchor: "end",
                    align: "end",
                    color: "#000",
                    font: Font {
                        weight: Some("bold"),
                        size: None,
                    },
                },
            },
            scales: Scales {
                x: Axis {
                    begin_at_zero: None,
                    min: None,
                    max: None,
                    ticks: Ticks {
                        display: true,
                        step_size: None,
                        color: "#000000",
                        font: Some(Font {
                            weight: None,
                            size: Some(14),
                        }),
                    },
                    grid: Toggle { display: false },
                },
                y: Axis {
                    begin_at_zero: Some(true),
                    min: Some(0.0),
                    max: Some(MAX_SCORE),
                    ticks: Ticks {
                        display: true,
                        step_size: Some(1.0),
                        color: "#000000",
                        font: None,
                    },
                    grid: Toggle { display: false },
                },
            },
        }
    }
}
