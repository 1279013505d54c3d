//! Insight engine configuration
//!
//! Every threshold the heuristics use lives here so a store can tune them
//! without a rebuild.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, else the override in the data dir
//!    (~/.local/share/storeforge/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::types::HeuristicKind;

/// Longest revenue window accepted from config (ten years)
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../../config/insights.toml");

/// Thresholds and limits for insight generation
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Stock strictly below this is low
    pub low_stock_threshold: u64,
    /// Lowest-stock products named in the restock recommendation
    pub restock_list_size: usize,
    /// Best sellers counted in the top-product share
    pub top_products: usize,
    /// Length of each revenue comparison window
    pub window_days: i64,
    /// Percent change beyond which revenue is rising or falling
    pub trend_threshold_pct: f64,
    /// Pending orders above this are a backlog
    pub pending_backlog_threshold: usize,
    pub concentration_high_pct: f64,
    pub breadth_low_pct: f64,
    pub breadth_min_orders: usize,
    pub aov_low: f64,
    pub aov_high: f64,
    pub max_insights: usize,
    pub max_recommendations: usize,
    pub max_warnings: usize,
    /// Heuristics that are skipped
    pub disabled: Vec<HeuristicKind>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            restock_list_size: 5,
            top_products: 5,
            window_days: 7,
            trend_threshold_pct: 10.0,
            pending_backlog_threshold: 10,
            concentration_high_pct: 60.0,
            breadth_low_pct: 30.0,
            breadth_min_orders: 50,
            aov_low: 50.0,
            aov_high: 150.0,
            max_insights: 8,
            max_recommendations: 10,
            max_warnings: 10,
            disabled: Vec::new(),
        }
    }
}

impl InsightConfig {
    /// Load configuration (explicit path, then data-dir override, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => fs::read_to_string(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::from_toml(&content)
    }

    /// Parse config from TOML content, applying it over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(inventory) = raw.inventory {
            if let Some(threshold) = inventory.low_stock_threshold {
                config.low_stock_threshold = threshold;
            }
            if let Some(size) = inventory.restock_list_size {
                if size == 0 {
                    return Err(Error::Config(
                        "inventory.restock_list_size must be at least 1".to_string(),
                    ));
                }
                config.restock_list_size = size;
            }
        }

        if let Some(top) = raw.catalog.and_then(|c| c.top_products) {
            config.top_products = top;
        }

        if let Some(trend) = raw.trend {
            if let Some(days) = trend.window_days {
                if !(1..=MAX_WINDOW_DAYS).contains(&days) {
                    return Err(Error::Config(format!(
                        "trend.window_days must be between 1 and {}, got {}",
                        MAX_WINDOW_DAYS, days
                    )));
                }
                config.window_days = days;
            }
            if let Some(threshold) = trend.threshold_pct {
                config.trend_threshold_pct = threshold;
            }
        }

        if let Some(threshold) = raw.fulfillment.and_then(|f| f.pending_backlog_threshold) {
            config.pending_backlog_threshold = threshold;
        }

        if let Some(concentration) = raw.concentration {
            if let Some(high) = concentration.high_pct {
                config.concentration_high_pct = high;
            }
            if let Some(low) = concentration.breadth_low_pct {
                config.breadth_low_pct = low;
            }
            if let Some(min_orders) = concentration.breadth_min_orders {
                config.breadth_min_orders = min_orders;
            }
        }

        if let Some(pricing) = raw.pricing {
            if let Some(low) = pricing.aov_low {
                config.aov_low = low;
            }
            if let Some(high) = pricing.aov_high {
                config.aov_high = high;
            }
        }

        if let Some(limits) = raw.limits {
            if let Some(max) = limits.max_insights {
                config.max_insights = max;
            }
            if let Some(max) = limits.max_recommendations {
                config.max_recommendations = max;
            }
            if let Some(max) = limits.max_warnings {
                config.max_warnings = max;
            }
        }

        if let Some(disabled) = raw.heuristics.and_then(|h| h.disabled) {
            config.disabled = disabled
                .iter()
                .map(|name| name.parse::<HeuristicKind>().map_err(Error::Config))
                .collect::<Result<Vec<_>>>()?;
        }

        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        let raw = RawConfig {
            inventory: Some(RawInventory {
                low_stock_threshold: Some(self.low_stock_threshold),
                restock_list_size: Some(self.restock_list_size),
            }),
            catalog: Some(RawCatalog {
                top_products: Some(self.top_products),
            }),
            trend: Some(RawTrend {
                window_days: Some(self.window_days),
                threshold_pct: Some(self.trend_threshold_pct),
            }),
            fulfillment: Some(RawFulfillment {
                pending_backlog_threshold: Some(self.pending_backlog_threshold),
            }),
            concentration: Some(RawConcentration {
                high_pct: Some(self.concentration_high_pct),
                breadth_low_pct: Some(self.breadth_low_pct),
                breadth_min_orders: Some(self.breadth_min_orders),
            }),
            pricing: Some(RawPricing {
                aov_low: Some(self.aov_low),
                aov_high: Some(self.aov_high),
            }),
            limits: Some(RawLimits {
                max_insights: Some(self.max_insights),
                max_recommendations: Some(self.max_recommendations),
                max_warnings: Some(self.max_warnings),
            }),
            heuristics: Some(RawHeuristics {
                disabled: Some(self.disabled.iter().map(|k| k.as_str().to_string()).collect()),
            }),
        };

        toml::to_string(&raw).map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    pub fn is_disabled(&self, kind: HeuristicKind) -> bool {
        self.disabled.contains(&kind)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("storeforge").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawConfig {
    inventory: Option<RawInventory>,
    catalog: Option<RawCatalog>,
    trend: Option<RawTrend>,
    fulfillment: Option<RawFulfillment>,
    concentration: Option<RawConcentration>,
    pricing: Option<RawPricing>,
    limits: Option<RawLimits>,
    heuristics: Option<RawHeuristics>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawInventory {
    low_stock_threshold: Option<u64>,
    restock_list_size: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawCatalog {
    top_products: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTrend {
    window_days: Option<i64>,
    threshold_pct: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawFulfillment {
    pending_backlog_threshold: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawConcentration {
    high_pct: Option<f64>,
    breadth_low_pct: Option<f64>,
    breadth_min_orders: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawPricing {
    aov_low: Option<f64>,
    aov_high: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawLimits {
    max_insights: Option<usize>,
    max_recommendations: Option<usize>,
    max_warnings: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawHeuristics {
    disabled: Option<Vec<String>>,
}
