//! Risk data model and tier classification
//!
//! A score is classified into one of three tiers using fixed thresholds:
//!
//! ```text
//! score >= 6.6        -> High   (red)
//! 5.0 <= score < 6.6  -> Medium (amber)
//! score < 5.0         -> Low    (teal)
//! ```
//!
//! Scores outside the nominal 0..=10 range are classified as-is (no clamping).

use serde::{Deserialize, Serialize};

/// Scores at or above this value are High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 6.6;

/// Scores at or above this value (and below [`HIGH_RISK_THRESHOLD`]) are Medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 5.0;

/// Upper bound of the nominal score range, also the fixed chart axis maximum.
pub const MAX_SCORE: f64 = 10.0;

/// The assessed categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    MarketMaturity,
    MarketSituation,
    Competitors,
    Competition,
    Customers,
}

impl Category {
    /// All categories in chart order
    pub const ALL: [Category; 5] = [
        Category::MarketMaturity,
        Category::MarketSituation,
        Category::Competitors,
        Category::Competition,
        Category::Customers,
    ];

    /// Human readable label used on the chart axis
    pub fn label(&self) -> &'static str {
        match self {
            Category::MarketMaturity => "Market Maturity",
            Category::MarketSituation => "Market Situation",
            Category::Competitors => "Competitors",
            Category::Competition => "Competition",
            Category::Customers => "Customers",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One category's risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub category: String,
    pub score: f64,
}

impl RiskEntry {
    pub fn new(category: impl Into<String>, score: f64) -> Self {
        Self {
            category: category.into(),
            score,
        }
    }

    /// Tier of this entry's score
    pub fn tier(&self) -> RiskTier {
        RiskTier::classify(self.score)
    }
}

/// The built-in sample assessment
pub fn sample_entries() -> Vec<RiskEntry> {
    let scores = [6.6, 6.3, 5.7, 4.0, 5.3];
    Category::ALL
        .iter()
        .zip(scores)
        .map(|(category, score)| RiskEntry::new(category.label(), score))
        .collect()
}

/// Risk classification bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// Classify a score. NaN fails both comparisons and lands in Low.
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Base color of the tier
    pub fn color(&self) -> Rgb {
        match self {
            RiskTier::High => Rgb(255, 0, 0),
            RiskTier::Medium => Rgb(255, 205, 86),
            RiskTier::Low => Rgb(75, 192, 192),
        }
    }

    /// Bar fill: the tier color at 80% opacity
    pub fn fill_color(&self) -> String {
        self.color().with_alpha(0.8)
    }

    /// Bar border: the opaque tier color
    pub fn border_color(&self) -> String {
        self.color().to_string()
    }

    /// Legend heading text
    pub fn title(&self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::Low => "Low Risk",
        }
    }

    /// What the tier means for the business
    pub fn description(&self) -> &'static str {
        match self {
            RiskTier::High => "Strong need for innovation",
            RiskTier::Medium => "Need for innovation",
            RiskTier::Low => "Low need for innovation",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::High => write!(f, "High"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::Low => write!(f, "Low"),
        }
    }
}

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `rgba(...)` form
    pub fn with_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }

    /// CSS hex form, e.g. `#ffcd56`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// One entry of the static legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub tier: RiskTier,
    pub title: &'static str,
    pub description: &'static str,
    pub color: String,
}

/// The legend, independent of any data
pub fn legend() -> Vec<LegendEntry> {
    [RiskTier::High, RiskTier::Medium, RiskTier::Low]
        .into_iter()
        .map(|tier| LegendEntry {
            tier,
            title: tier.title(),
            description: tier.description(),
            color: tier.color().hex(),
        })
        .collect()
}

/// Fixed-point text with ties rounded away from zero.
///
/// `{:.N}` alone rounds an exact tie to the even digit (4.25 -> "4.2"); chart
/// labels round it up (4.25 -> "4.3"). Only values whose exact binary value
/// ends in a 5 at the first dropped digit are ties, so 1.005 (stored as
/// 1.00499...) still gives "1.00".
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let exact = format!("{:.*}", decimals + 20, value);
    let is_tie = exact.split_once('.').is_some_and(|(_, fraction)| {
        fraction[decimals..].starts_with('5')
            && fraction[decimals + 1..].bytes().all(|b| b == b'0')
    });

    let value = if is_tie {
        value + value.signum() * 0.25 * 10f64.powi(-(decimals as i32))
    } else {
        value
    };
    format!("{:.*}", decimals, value)
}

/// Value annotation drawn on top of a bar (one decimal)
pub fn format_bar_label(value: f64) -> String {
    to_fixed(value, 1)
}

/// Hover tooltip text: `"<dataset>: <value>"` with two decimals
pub fn format_tooltip_label(dataset_label: &str, value: Option<f64>) -> String {
    let mut label = dataset_label.to_string();
    if !label.is_empty() {
        label.push_str(": ");
    }
    if let Some(value) = value {
        label.push_str(&to_fixed(value, 2));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(6.6, RiskTier::High)]
    #[case(9.9, RiskTier::High)]
    #[case(6.59, RiskTier::Medium)]
    #[case(5.0, RiskTier::Medium)]
    #[case(4.99, RiskTier::Low)]
    #[case(0.0, RiskTier::Low)]
    #[case(12.5, RiskTier::High)]
    #[case(-3.0, RiskTier::Low)]
    #[case(f64::NAN, RiskTier::Low)]
    fn test_classify(#[case] score: f64, #[case] expected: RiskTier) {
        assert_eq!(RiskTier::classify(score), expected);
    }

    #[test]
    fn test_sample_tiers() {
        let tiers: Vec<RiskTier> = sample_entries().iter().map(RiskEntry::tier).collect();
        assert_eq!(
            tiers,
            vec![
                RiskTier::High,
                RiskTier::Medium,
                RiskTier::Medium,
                RiskTier::Low,
                RiskTier::Medium,
            ]
        );
    }

    #[test]
    fn test_sample_follows_category_order() {
        let categories: Vec<String> = sample_entries().into_iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec![
                "Market Maturity",
                "Market Situation",
                "Competitors",
                "Competition",
                "Customers",
            ]
        );
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(RiskTier::High.border_color(), "rgb(255, 0, 0)");
        assert_eq!(RiskTier::Medium.fill_color(), "rgba(255, 205, 86, 0.8)");
        assert_eq!(RiskTier::Low.color().hex(), "#4bc0c0");
    }

    #[test]
    fn test_legend_is_fixed() {
        let legend = legend();
        assert_eq!(legend.len(), 3);
        assert_eq!(legend[0].title, "High Risk");
        assert_eq!(legend[1].description, "Need for innovation");
        assert_eq!(legend[2].color, "#4bc0c0");
    }

    #[rstest]
    #[case(6.6, "6.6")]
    #[case(4.0, "4.0")]
    #[case(5.26, "5.3")]
    #[case(10.0, "10.0")]
    #[case(4.25, "4.3")]
    #[case(6.75, "6.8")]
    #[case(-4.25, "-4.3")]
    fn test_format_bar_label(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_bar_label(value), expected);
    }

    #[rstest]
    #[case(0.125, "Risk Levels: 0.13")]
    #[case(6.625, "Risk Levels: 6.63")]
    #[case(1.005, "Risk Levels: 1.00")]
    #[case(6.6, "Risk Levels: 6.60")]
    fn test_format_tooltip_label_rounds_ties_up(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_tooltip_label("Risk Levels", Some(value)), expected);
    }

    #[test]
    fn test_format_tooltip_label() {
        assert_eq!(
            format_tooltip_label("Risk Levels", Some(6.6)),
            "Risk Levels: 6.60"
        );
        assert_eq!(format_tooltip_label("", Some(4.0)), "4.00");
        assert_eq!(format_tooltip_label("Risk Levels", None), "Risk Levels: ");
    }
}
