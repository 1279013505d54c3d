//! Insight Engine - orchestrates heuristics over the store metrics

use chrono::{DateTime, Utc};

use crate::models::{Order, Product};

use super::config::InsightConfig;
use super::heuristics::{
    ConcentrationHeuristic, FulfillmentHeuristic, InventoryHeuristic, MarketingHeuristic,
    OperationsHeuristic, OverviewHeuristic, PricingHeuristic, TrendHeuristic,
};
use super::metrics::StoreMetrics;
use super::types::{HeuristicKind, InsightReport, ReportBuilder};

/// Context provided to heuristics
pub struct AnalysisContext<'a> {
    pub orders: &'a [Order],
    pub products: &'a [Product],
    /// Aggregates computed once per report
    pub metrics: &'a StoreMetrics,
    pub config: &'a InsightConfig,
    /// Reference time for the revenue windows
    pub now: DateTime<Utc>,
}

/// Trait for insight heuristics
pub trait Heuristic: Send + Sync {
    /// Identifier, also used to disable the heuristic in config
    fn id(&self) -> HeuristicKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Append statements for this heuristic
    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder);
}

/// The main insight engine
///
/// Stateless between calls: every report is built from scratch, so one engine
/// can serve concurrent callers.
pub struct InsightEngine {
    config: InsightConfig,
    heuristics: Vec<Box<dyn Heuristic>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with default thresholds and the built-in heuristics
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    pub fn with_config(config: InsightConfig) -> Self {
        let mut engine = Self {
            config,
            heuristics: vec![],
        };

        // Registration order is statement order
        engine.register(Box::new(OverviewHeuristic));
        engine.register(Box::new(TrendHeuristic));
        engine.register(Box::new(InventoryHeuristic));
        engine.register(Box::new(FulfillmentHeuristic));
        engine.register(Box::new(ConcentrationHeuristic));
        engine.register(Box::new(PricingHeuristic));
        engine.register(Box::new(MarketingHeuristic));
        engine.register(Box::new(OperationsHeuristic));

        engine
    }

    /// Register a heuristic; it runs after those already registered
    pub fn register(&mut self, heuristic: Box<dyn Heuristic>) {
        self.heuristics.push(heuristic);
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Registered heuristics, in run order
    pub fn heuristic_kinds(&self) -> Vec<HeuristicKind> {
        self.heuristics.iter().map(|h| h.id()).collect()
    }

    /// Build a report for the given inputs as of `now`
    pub fn generate(
        &self,
        orders: &[Order],
        products: &[Product],
        now: DateTime<Utc>,
    ) -> InsightReport {
        if products.is_empty() {
            tracing::debug!(orders = orders.len(), "No products, returning insufficient-data report");
            return InsightReport::insufficient_data();
        }

        let metrics = StoreMetrics::compute(orders, products, now, &self.config);
        let ctx = AnalysisContext {
            orders,
            products,
            metrics: &metrics,
            config: &self.config,
            now,
        };

        let mut report = ReportBuilder::new();
        for heuristic in &self.heuristics {
            if self.config.is_disabled(heuristic.id()) {
                tracing::debug!(heuristic = heuristic.id().as_str(), "Heuristic disabled");
                continue;
            }

            let (insights, recs, warns) = report.counts();
            heuristic.apply(&ctx, &mut report);
            let (insights_after, recs_after, warns_after) = report.counts();

            tracing::debug!(
                heuristic = heuristic.id().as_str(),
                name = heuristic.name(),
                insights = insights_after - insights,
                recommendations = recs_after - recs,
                warnings = warns_after - warns,
                "Heuristic applied"
            );
        }

        let summary = metrics.summary_line(self.config.window_days);
        let report = report.finish(summary, metrics, &self.config);

        tracing::info!(
            orders = orders.len(),
            products = products.len(),
            insights = report.key_insights.len(),
            recommendations = report.recommendations.len(),
            warnings = report.warnings.len(),
            "Insight report generated"
        );

        report
    }
}

/// Generate a report with default thresholds using the current time
pub fn generate_insights(orders: &[Order], products: &[Product]) -> InsightReport {
    generate_insights_at(orders, products, Utc::now())
}

/// Generate a report with default thresholds as of `now`
pub fn generate_insights_at(
    orders: &[Order],
    products: &[Product],
    now: DateTime<Utc>,
) -> InsightReport {
    InsightEngine::new().generate(orders, products, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::heuristics::{OPERATIONS_CHECKLIST, QUICK_WINS};
    use crate::models::{OrderStatus, PaymentStatus};
    use crate::test_utils::{fixed_now, order_days_ago, scenario_orders, scenario_products};

    /// Emits a fixed set of statements, for exercising dedup and caps
    struct NoisyHeuristic {
        repeat: usize,
    }

    impl Heuristic for NoisyHeuristic {
        fn id(&self) -> HeuristicKind {
            HeuristicKind::Marketing
        }

        fn name(&self) -> &'static str {
            "Noisy"
        }

        fn apply(&self, _ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
            report.recommend(QUICK_WINS);
            for i in 0..self.repeat {
                report.insight(format!("insight {}", i));
                report.recommend(format!("recommendation {}", i));
                report.warn(format!("warning {}", i));
                report.warn(format!("warning {}", i));
            }
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        assert_eq!(engine.heuristic_kinds(), HeuristicKind::all().to_vec());
    }

    #[test]
    fn test_empty_products_short_circuit() {
        let report = generate_insights_at(&[], &[], fixed_now());
        assert!(report.is_insufficient_data());

        let report = generate_insights_at(&scenario_orders(), &[], fixed_now());
        assert_eq!(report.summary, "Not enough data to generate insights.");
        assert!(report.key_insights.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn test_scenario_report() {
        let report = generate_insights_at(&scenario_orders(), &scenario_products(), fixed_now());
        let metrics = report.metrics.as_ref().unwrap();

        assert_eq!(metrics.total_revenue, 200.0);
        assert_eq!(metrics.total_orders, 2);
        assert_eq!(metrics.avg_order_value, 100.0);
        let low: Vec<&str> = metrics.low_stock.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(low, vec!["Product A", "Product C"]);
        assert_eq!(metrics.unpaid_count, 1);

        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("2 products are critically low in stock")));
        assert!(report.warnings.iter().any(|w| w == "1 order is still unpaid."));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.starts_with("Send payment reminders")));
        assert!(report
            .recommendations
            .contains(&"Restock soon: Product C (0 left), Product A (5 left).".to_string()));

        assert_eq!(report.key_insights[0], "Total revenue $200.00 across 2 orders.");
        assert_eq!(report.key_insights[1], "Average order value is $100.00.");
        assert_eq!(report.recommendations.last().unwrap(), OPERATIONS_CHECKLIST);
    }

    #[test]
    fn test_trend_branches() {
        let products = scenario_products();

        let rising = vec![order_days_ago("a", 300.0, 2), order_days_ago("b", 100.0, 9)];
        let report = generate_insights_at(&rising, &products, fixed_now());
        assert_eq!(report.metrics.as_ref().unwrap().pct_change, 200.0);
        assert!(report.key_insights.iter().any(|i| i.starts_with("Revenue is up 200.00%")));
        assert!(report.recommendations.iter().any(|r| r.starts_with("Demand is rising")));

        let falling = vec![order_days_ago("a", 50.0, 2), order_days_ago("b", 100.0, 9)];
        let report = generate_insights_at(&falling, &products, fixed_now());
        assert!(report
            .warnings
            .contains(&"Revenue declined 50.00% compared with the previous 7 days.".to_string()));
        assert!(report.recommendations.iter().any(|r| r.starts_with("Run a recovery promotion")));

        let flat = vec![order_days_ago("a", 105.0, 2), order_days_ago("b", 100.0, 9)];
        let report = generate_insights_at(&flat, &products, fixed_now());
        assert!(report.key_insights.iter().any(|i| i.contains("relatively stable")));
    }

    #[test]
    fn test_new_revenue_saturates_to_hundred() {
        let orders = vec![order_days_ago("a", 500.0, 1)];
        let report = generate_insights_at(&orders, &scenario_products(), fixed_now());
        assert_eq!(report.metrics.as_ref().unwrap().pct_change, 100.0);
    }

    #[test]
    fn test_pending_backlog_and_breadth() {
        let products: Vec<Product> = (0..20)
            .map(|i| {
                Product::new(format!("p{}", i), format!("Item {}", i), 10.0)
                    .with_stock(100)
                    .with_orders_received(10)
            })
            .collect();
        let orders: Vec<Order> = (0..60)
            .map(|i| Order::new(i.to_string(), 80.0).with_status(
                if i < 12 { OrderStatus::Pending } else { OrderStatus::Delivered },
                PaymentStatus::Paid,
            ))
            .collect();

        let report = generate_insights_at(&orders, &products, fixed_now());
        let metrics = report.metrics.as_ref().unwrap();
        assert_eq!(metrics.top_share_pct, 25.0);

        assert!(report
            .warnings
            .contains(&"12 orders are waiting to be fulfilled.".to_string()));
        assert!(report.key_insights.iter().any(|i| i.starts_with("Sales are spread")));
        assert!(report.key_insights.iter().any(|i| i.starts_with("Inventory looks healthy")));
        assert!(!report.warnings.iter().any(|w| w.contains("unpaid")));
    }

    #[test]
    fn test_pricing_branches() {
        let products = scenario_products();

        let cheap = vec![Order::new("1", 20.0)];
        let report = generate_insights_at(&cheap, &products, fixed_now());
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("upsells and cross-sells")));

        let premium = vec![Order::new("1", 400.0)];
        let report = generate_insights_at(&premium, &products, fixed_now());
        assert!(report.recommendations.iter().any(|r| r.contains("loyalty rewards")));

        let mid = vec![Order::new("1", 100.0)];
        let report = generate_insights_at(&mid, &products, fixed_now());
        assert!(!report
            .recommendations
            .iter()
            .any(|r| r.starts_with("Average order value is")));
    }

    #[test]
    fn test_concentration_risk() {
        let report = generate_insights_at(&scenario_orders(), &scenario_products(), fixed_now());
        assert_eq!(report.metrics.as_ref().unwrap().top_share_pct, 100.0);

        assert!(report
            .warnings
            .contains(&"Top 3 products generate 100.0% of product revenue; sales are highly concentrated.".to_string()));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.starts_with("Diversify revenue")));
    }

    /// Five best sellers at 12 orders and $1, plus one slower product
    fn catalog_with_tail(tail_price: f64) -> Vec<Product> {
        let mut products: Vec<Product> = (0..5)
            .map(|i| {
                Product::new(format!("p{}", i), format!("Item {}", i), 1.0)
                    .with_stock(100)
                    .with_orders_received(12)
            })
            .collect();
        products.push(
            Product::new("tail", "Tail", tail_price)
                .with_stock(100)
                .with_orders_received(10),
        );
        products
    }

    fn delivered_orders(count: usize, amount: f64) -> Vec<Order> {
        (0..count)
            .map(|i| {
                Order::new(i.to_string(), amount)
                    .with_status(OrderStatus::Delivered, PaymentStatus::Paid)
            })
            .collect()
    }

    #[test]
    fn test_concentration_threshold_is_strict() {
        // 60 of 100 attributed revenue comes from the top five
        let products = catalog_with_tail(4.0);
        let report = generate_insights_at(&delivered_orders(3, 100.0), &products, fixed_now());

        assert_eq!(report.metrics.as_ref().unwrap().top_share_pct, 60.0);
        assert!(!report.warnings.iter().any(|w| w.contains("highly concentrated")));
        assert!(!report.recommendations.iter().any(|r| r.starts_with("Diversify revenue")));
    }

    #[test]
    fn test_breadth_needs_more_than_minimum_orders() {
        // 60 of 210 attributed revenue: 28.6%
        let products = catalog_with_tail(15.0);

        let report = generate_insights_at(&delivered_orders(50, 100.0), &products, fixed_now());
        assert_eq!(report.metrics.as_ref().unwrap().top_share_pct, 28.6);
        assert!(!report.key_insights.iter().any(|i| i.starts_with("Sales are spread")));

        let report = generate_insights_at(&delivered_orders(51, 100.0), &products, fixed_now());
        assert!(report.key_insights.iter().any(|i| i.starts_with("Sales are spread")));
    }

    #[test]
    fn test_trend_threshold_is_strict() {
        let products = scenario_products();

        let up = vec![order_days_ago("a", 110.0, 2), order_days_ago("b", 100.0, 9)];
        let report = generate_insights_at(&up, &products, fixed_now());
        assert_eq!(report.metrics.as_ref().unwrap().pct_change, 10.0);
        assert!(report.key_insights.iter().any(|i| i.contains("relatively stable")));
        assert!(!report.recommendations.iter().any(|r| r.starts_with("Demand is rising")));

        let down = vec![order_days_ago("a", 90.0, 2), order_days_ago("b", 100.0, 9)];
        let report = generate_insights_at(&down, &products, fixed_now());
        assert_eq!(report.metrics.as_ref().unwrap().pct_change, -10.0);
        assert!(report.key_insights.iter().any(|i| i.contains("relatively stable")));
        assert!(!report.warnings.iter().any(|w| w.starts_with("Revenue declined")));
    }

    #[test]
    fn test_backlog_threshold_is_strict() {
        let products = scenario_products();
        let pending = |count: usize| -> Vec<Order> {
            (0..count)
                .map(|i| Order::new(i.to_string(), 100.0).with_status(OrderStatus::Pending, PaymentStatus::Paid))
                .collect()
        };

        let report = generate_insights_at(&pending(10), &products, fixed_now());
        assert!(!report
            .warnings
            .iter()
            .any(|w| w.ends_with("waiting to be fulfilled.")));

        let report = generate_insights_at(&pending(11), &products, fixed_now());
        assert!(report
            .warnings
            .contains(&"11 orders are waiting to be fulfilled.".to_string()));
    }

    #[test]
    fn test_pricing_thresholds_are_strict() {
        let products = scenario_products();

        for amount in [50.0, 150.0] {
            let report = generate_insights_at(&[Order::new("1", amount)], &products, fixed_now());
            assert_eq!(report.metrics.as_ref().unwrap().avg_order_value, amount);
            assert!(!report
                .recommendations
                .iter()
                .any(|r| r.starts_with("Average order value is")));
        }
    }

    #[test]
    fn test_out_of_range_config_does_not_panic() {
        let config = InsightConfig {
            window_days: 200_000_000,
            restock_list_size: 0,
            ..Default::default()
        };
        let engine = InsightEngine::with_config(config);
        let report = engine.generate(&scenario_orders(), &scenario_products(), fixed_now());

        let metrics = report.metrics.as_ref().unwrap();
        assert_eq!(metrics.revenue_windows.last, 0.0);
        assert_eq!(metrics.pct_change, 0.0);
        assert!(!report.recommendations.iter().any(|r| r.starts_with("Restock soon")));
        assert!(report.warnings.iter().any(|w| w.contains("critically low")));
    }

    #[test]
    fn test_no_orders_skips_quick_wins() {
        let report = generate_insights_at(&[], &scenario_products(), fixed_now());
        assert!(!report.recommendations.contains(&QUICK_WINS.to_string()));
        assert_eq!(report.recommendations.last().unwrap(), OPERATIONS_CHECKLIST);
    }

    #[test]
    fn test_duplicates_removed_and_caps_applied() {
        let mut engine = InsightEngine::new();
        engine.register(Box::new(NoisyHeuristic { repeat: 15 }));

        let report = engine.generate(&scenario_orders(), &scenario_products(), fixed_now());

        let quick_wins = report
            .recommendations
            .iter()
            .filter(|r| r.as_str() == QUICK_WINS)
            .count();
        assert_eq!(quick_wins, 1);
        assert_eq!(report.key_insights.len(), 8);
        assert_eq!(report.recommendations.len(), 10);
        assert_eq!(report.warnings.len(), 10);

        let mut warnings = report.warnings.clone();
        warnings.dedup();
        assert_eq!(warnings.len(), report.warnings.len());
    }

    #[test]
    fn test_disabled_heuristics_are_skipped() {
        let config = InsightConfig {
            disabled: vec![HeuristicKind::Operations, HeuristicKind::Inventory],
            ..Default::default()
        };
        let engine = InsightEngine::with_config(config);
        let report = engine.generate(&scenario_orders(), &scenario_products(), fixed_now());

        assert!(!report.recommendations.contains(&OPERATIONS_CHECKLIST.to_string()));
        assert!(!report.warnings.iter().any(|w| w.contains("critically low")));
    }

    #[test]
    fn test_idempotent_for_fixed_now() {
        let orders = scenario_orders();
        let products = scenario_products();
        let first = generate_insights_at(&orders, &products, fixed_now());
        let second = generate_insights_at(&orders, &products, fixed_now());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_inputs_untouched() {
        let orders = scenario_orders();
        let products = scenario_products();
        let (orders_before, products_before) = (orders.clone(), products.clone());

        let _ = generate_insights_at(&orders, &products, fixed_now());

        assert_eq!(orders, orders_before);
        assert_eq!(products, products_before);
    }
}
