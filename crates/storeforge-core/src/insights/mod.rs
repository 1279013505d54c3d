//! Insight Engine - Store Performance Insights
//!
//! Turns the already-fetched order and product collections into a short
//! business report: a summary line, observations, recommendations and
//! warnings. Everything is deterministic for a given input and reference
//! time; there is no I/O and no state kept between calls.
//!
//! ## Heuristics
//!
//! - **Overview** - Revenue, average order value, best sellers
//! - **Trend** - Week-over-week revenue change
//! - **Inventory** - Low-stock products and what to restock first
//! - **Fulfillment** - Unpaid orders and pending backlog
//! - **Concentration** - Dependence on the top products
//! - **Pricing** - Average order value positioning
//! - **Marketing** / **Operations** - Standing recommendations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storeforge_core::insights::{generate_insights_at, InsightEngine, InsightConfig};
//!
//! let report = generate_insights_at(&orders, &products, now);
//!
//! let engine = InsightEngine::with_config(InsightConfig::load(None)?);
//! let report = engine.generate(&orders, &products, chrono::Utc::now());
//! ```

pub mod config;
pub mod engine;
pub mod format;
pub mod heuristics;
pub mod metrics;
pub mod types;

pub use config::{default_config_path, InsightConfig};
pub use engine::{generate_insights, generate_insights_at, AnalysisContext, Heuristic, InsightEngine};
pub use metrics::{percent_change, ProductStanding, RevenueWindows, StoreMetrics};
pub use types::{
    dedup_capped, HeuristicKind, InsightReport, ReportBuilder, INSUFFICIENT_DATA_RECOMMENDATION,
    INSUFFICIENT_DATA_SUMMARY,
};
