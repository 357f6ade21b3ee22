//! Terminal and JSON output of the dashboard
//!
//! Both renderers consume a [`Rendering`], so the terminal view shows the same
//! bars, colors and labels as the web chart.

use std::io::{self, Write};

use crate::chart::ChartConfig;
use crate::risk::{LegendEntry, MAX_SCORE, RiskTier};
use crate::view::{DASHBOARD_TITLE, Rendering};

/// Width in characters of a full-scale (10.0) bar
pub const BAR_WIDTH: usize = 40;

fn tier_icon(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "🔴",
        RiskTier::Medium => "🟡",
        RiskTier::Low => "🔵",
    }
}

/// Number of filled cells for a score on the fixed 0..10 axis.
///
/// Values beyond the axis are clipped rather than rescaled.
pub fn bar_cells(score: f64, width: usize) -> usize {
    if !score.is_finite() {
        return 0;
    }
    let ratio = score.clamp(0.0, MAX_SCORE) / MAX_SCORE;
    (ratio * width as f64).round() as usize
}

/// Write the dashboard as text
pub fn generate_text_output<W: Write>(rendering: &Rendering, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", DASHBOARD_TITLE)?;
    writeln!(
        writer,
        "═══════════════════════════════════════════════════════════"
    )?;
    writeln!(writer)?;

    match rendering {
        Rendering::Placeholder { message } => {
            writeln!(writer, "{}", message)?;
        }
        Rendering::Chart { chart, legend } => {
            write_bars(chart, writer)?;
            writeln!(writer)?;
            write_legend(legend, writer)?;
        }
        Rendering::Error { kind, message } => {
            writeln!(writer, "❌ Could not load risk data ({})", kind)?;
            writeln!(writer, "   {}", message)?;
        }
    }

    Ok(())
}

fn write_bars<W: Write>(chart: &ChartConfig, writer: &mut W) -> io::Result<()> {
    let Some(dataset) = chart.data.datasets.first() else {
        return Ok(());
    };

    let label_width = chart
        .data
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    let bars = chart
        .data
        .labels
        .iter()
        .zip(&dataset.data)
        .zip(&dataset.tiers)
        .zip(&dataset.bar_labels);

    for (((label, &score), &tier), value) in bars {
        let filled = bar_cells(score, BAR_WIDTH);
        writeln!(
            writer,
            "{:<label_width$} │{}{} {} {:>5}",
            label,
            "█".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            tier_icon(tier),
            value,
        )?;
    }

    // Axis: 0..=10 in steps of 1
    let step = BAR_WIDTH / MAX_SCORE as usize;
    let mut axis = String::new();
    for tick in 0..=MAX_SCORE as usize {
        let cell = format!("{:<step$}", tick);
        axis.push_str(&cell);
    }
    writeln!(writer, "{:<label_width$} └{}", "", "─".repeat(BAR_WIDTH))?;
    writeln!(writer, "{:<label_width$}  {}", "", axis.trim_end())?;

    Ok(())
}

fn write_legend<W: Write>(legend: &[LegendEntry], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Legend:")?;
    for entry in legend {
        writeln!(
            writer,
            "  {} {} - {}",
            tier_icon(entry.tier),
            entry.title,
            entry.description
        )?;
    }
    Ok(())
}

/// Write the rendering as pretty JSON
pub fn generate_json_output<W: Write>(rendering: &Rendering, writer: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(rendering).map_err(io::Error::other)?;
    writeln!(writer, "{}", json)
}
