//! StoreForge Core Library
//!
//! Shared functionality for the StoreForge store dashboard:
//! - Order and product models with lenient JSON normalization
//! - Insight engine producing the business report
//! - Order tracking summaries and search
//! - Automation rules and alert filtering

pub mod automation;
pub mod error;
pub mod insights;
pub mod models;
pub mod normalize;
pub mod orders;

/// Fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use automation::{
    evaluate_inventory_rules, filter_alerts, filter_rules, parse_alerts, parse_rules, Alert,
    AlertStatus, AlertType, AutomationStats, Condition, Rule, RuleStatus, Trigger,
};
pub use error::{Error, Result};
pub use insights::{
    generate_insights, generate_insights_at, HeuristicKind, InsightConfig, InsightEngine,
    InsightReport, StoreMetrics,
};
pub use models::{Order, OrderItem, OrderStatus, PaymentStatus, Product};
pub use normalize::{parse_orders, parse_products};
pub use orders::{filter_orders, OrderSummary};
