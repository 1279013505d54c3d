//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::config::InsightConfig;
use super::metrics::StoreMetrics;

/// Summary line used when there are no products to analyze
pub const INSUFFICIENT_DATA_SUMMARY: &str = "Not enough data to generate insights.";

/// The single recommendation of the insufficient-data report
pub const INSUFFICIENT_DATA_RECOMMENDATION: &str =
    "Add products and collect a few weeks of orders so insights can be generated.";

/// Heuristics that contribute to a report, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Revenue, AOV and best sellers
    Overview,
    /// Week-over-week revenue change
    Trend,
    /// Low-stock detection
    Inventory,
    /// Unpaid and pending orders
    Fulfillment,
    /// Revenue concentration in the best sellers
    Concentration,
    /// Average order value positioning
    Pricing,
    /// Generic quick-win marketing plays
    Marketing,
    /// Fixed operational checklist
    Operations,
}

impl HeuristicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeuristicKind::Overview => "overview",
            HeuristicKind::Trend => "trend",
            HeuristicKind::Inventory => "inventory",
            HeuristicKind::Fulfillment => "fulfillment",
            HeuristicKind::Concentration => "concentration",
            HeuristicKind::Pricing => "pricing",
            HeuristicKind::Marketing => "marketing",
            HeuristicKind::Operations => "operations",
        }
    }

    pub fn all() -> &'static [HeuristicKind] {
        &[
            HeuristicKind::Overview,
            HeuristicKind::Trend,
            HeuristicKind::Inventory,
            HeuristicKind::Fulfillment,
            HeuristicKind::Concentration,
            HeuristicKind::Pricing,
            HeuristicKind::Marketing,
            HeuristicKind::Operations,
        ]
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown heuristic: {}", s))
    }
}

/// Business-insights report produced by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    /// One line combining the headline metrics
    pub summary: String,
    /// Observations, in generation order
    pub key_insights: Vec<String>,
    /// Actionable suggestions, de-duplicated
    pub recommendations: Vec<String>,
    /// Risks, de-duplicated
    pub warnings: Vec<String>,
    /// Metrics the statements were derived from (absent for insufficient data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<StoreMetrics>,
}

impl InsightReport {
    /// Fixed report returned when there are no products
    pub fn insufficient_data() -> Self {
        Self {
            summary: INSUFFICIENT_DATA_SUMMARY.to_string(),
            key_insights: Vec::new(),
            recommendations: vec![INSUFFICIENT_DATA_RECOMMENDATION.to_string()],
            warnings: Vec::new(),
            metrics: None,
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        self.metrics.is_none() && self.summary == INSUFFICIENT_DATA_SUMMARY
    }
}

/// Accumulates statements while heuristics run
#[derive(Debug, Default, Clone)]
pub struct ReportBuilder {
    key_insights: Vec<String>,
    recommendations: Vec<String>,
    warnings: Vec<String>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insight(&mut self, text: impl Into<String>) {
        self.key_insights.push(text.into());
    }

    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.warnings.push(text.into());
    }

    /// (insights, recommendations, warnings) collected so far
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.key_insights.len(),
            self.recommendations.len(),
            self.warnings.len(),
        )
    }

    /// Apply de-duplication and caps, producing the final report
    pub fn finish(
        self,
        summary: String,
        metrics: StoreMetrics,
        config: &InsightConfig,
    ) -> InsightReport {
        let mut key_insights = self.key_insights;
        key_insights.truncate(config.max_insights);

        InsightReport {
            summary,
            key_insights,
            recommendations: dedup_capped(self.recommendations, config.max_recommendations),
            warnings: dedup_capped(self.warnings, config.max_warnings),
            metrics: Some(metrics),
        }
    }
}

/// Drop exact duplicates keeping first occurrence, then cap the length
pub fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len().min(cap));
    for item in items {
        if out.len() == cap {
            break;
        }
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
