//! Built-in heuristics
//!
//! Each heuristic inspects the precomputed store metrics and appends
//! statements to the report. They run in registration order, which is also
//! the order statements appear in.

use super::engine::{AnalysisContext, Heuristic};
use super::format::{count_of, money, percent, signed_percent};
use super::metrics::ProductStanding;
use super::types::{HeuristicKind, ReportBuilder};

/// Revenue, AOV and best sellers
pub struct OverviewHeuristic;

impl Heuristic for OverviewHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Overview
    }

    fn name(&self) -> &'static str {
        "Store Overview"
    }

    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        let m = ctx.metrics;

        report.insight(format!(
            "Total revenue {} across {}.",
            money(m.total_revenue),
            count_of(m.total_orders, "order", "orders")
        ));
        report.insight(format!(
            "Average order value is {}.",
            money(m.avg_order_value)
        ));

        if !m.top_products.is_empty() {
            let names: Vec<String> = m
                .top_products
                .iter()
                .map(|p| format!("{} ({})", p.name, count_of(p.orders_received as usize, "order", "orders")))
                .collect();
            report.insight(format!(
                "Top products: {}. They account for {} of attributed product revenue.",
                names.join(", "),
                percent(m.top_share_pct, 1)
            ));
        }
    }
}

/// Week-over-week revenue movement
pub struct TrendHeuristic;

impl Heuristic for TrendHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Trend
    }

    fn name(&self) -> &'static str {
        "Revenue Trend"
    }

    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        let m = ctx.metrics;
        let days = ctx.config.window_days;
        let threshold = ctx.config.trend_threshold_pct;
        let windows = m.revenue_windows;

        if m.pct_change > threshold {
            report.insight(format!(
                "Revenue is up {} over the previous {} days ({} vs {}).",
                percent(m.pct_change, 2),
                days,
                money(windows.last),
                money(windows.previous)
            ));
            report.recommend(
                "Demand is rising: scale inventory and marketing spend behind your top performers.",
            );
        } else if m.pct_change < -threshold {
            let decline = percent(m.pct_change.abs(), 2);
            report.insight(format!(
                "Revenue is down {} over the previous {} days ({} vs {}).",
                decline,
                days,
                money(windows.last),
                money(windows.previous)
            ));
            report.warn(format!(
                "Revenue declined {} compared with the previous {} days.",
                decline, days
            ));
            report.recommend(
                "Run a recovery promotion and check fulfillment for delays that may be costing sales.",
            );
        } else {
            report.insight(format!(
                "Revenue is relatively stable compared with the previous {} days ({}).",
                days,
                signed_percent(m.pct_change, 2)
            ));
        }
    }
}

/// Low-stock detection and restock list
pub struct InventoryHeuristic;

impl Heuristic for InventoryHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Inventory
    }

    fn name(&self) -> &'static str {
        "Inventory"
    }

    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        let low_stock = &ctx.metrics.low_stock;
        let threshold = ctx.config.low_stock_threshold;

        if low_stock.is_empty() {
            report.insight(format!(
                "Inventory looks healthy: no product is below {} units.",
                threshold
            ));
            return;
        }

        let verb = if low_stock.len() == 1 { "is" } else { "are" };
        report.warn(format!(
            "{} {} critically low in stock (below {} units).",
            count_of(low_stock.len(), "product", "products"),
            verb,
            threshold
        ));

        let mut lowest: Vec<&ProductStanding> = low_stock.iter().collect();
        lowest.sort_by_key(|p| p.stock);
        let listed: Vec<String> = lowest
            .iter()
            .take(ctx.config.restock_list_size)
            .map(|p| format!("{} ({} left)", p.name, p.stock))
            .collect();
        if !listed.is_empty() {
            report.recommend(format!("Restock soon: {}.", listed.join(", ")));
        }
    }
}

/// Unpaid orders and fulfillment backlog
pub struct FulfillmentHeuristic;

impl Heuristic for FulfillmentHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Fulfillment
    }

    fn name(&self) -> &'static str {
        "Payments & Fulfillment"
    }

    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        let m = ctx.metrics;

        if m.unpaid_count > 0 {
            let verb = if m.unpaid_count == 1 { "is" } else { "are" };
            report.warn(format!(
                "{} {} still unpaid.",
                count_of(m.unpaid_count, "order", "orders"),
                verb
            ));
            report.recommend(
                "Send payment reminders for unpaid orders and hold shipment until payment clears.",
            );
        }

        if m.pending_count > ctx.config.pending_backlog_threshold {
            report.warn(format!(
                "{} are waiting to be fulfilled.",
                count_of(m.pending_count, "order", "orders")
            ));
            report.recommend(
                "Add packing staff or batch fulfillment to work through the pending order backlog.",
            );
        }
    }
}

/// Revenue concentration in the best sellers
pub struct ConcentrationHeuristic;

impl Heuristic for ConcentrationHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Concentration
    }

    fn name(&self) -> &'static str {
        "Revenue Concentration"
    }

    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        let m = ctx.metrics;
        let config = ctx.config;
        let top = m.top_products.len();

        if m.top_share_pct > config.concentration_high_pct {
            report.warn(format!(
                "Top {} products generate {} of product revenue; sales are highly concentrated.",
                top,
                percent(m.top_share_pct, 1)
            ));
            report.recommend(
                "Diversify revenue: promote mid-tier products and bundle slow movers with best sellers.",
            );
        } else if m.top_share_pct < config.breadth_low_pct
            && m.total_orders > config.breadth_min_orders
        {
            report.insight(format!(
                "Sales are spread across the catalog: the top {} products make up only {} of product revenue.",
                top,
                percent(m.top_share_pct, 1)
            ));
            report.recommend(
                "Raise average order value with bundles and free-shipping thresholds.",
            );
        }
    }
}

/// Average order value positioning
pub struct PricingHeuristic;

impl Heuristic for PricingHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Pricing
    }

    fn name(&self) -> &'static str {
        "Pricing"
    }

    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        let aov = ctx.metrics.avg_order_value;

        if aov < ctx.config.aov_low {
            report.recommend(format!(
                "Average order value is {}; add upsells and cross-sells at checkout.",
                money(aov)
            ));
        } else if aov > ctx.config.aov_high {
            report.recommend(format!(
                "Average order value is {}; offer loyalty rewards or subscriptions to keep high spenders coming back.",
                money(aov)
            ));
        }
    }
}

/// Generic marketing plays once there is any order history
pub struct MarketingHeuristic;

pub const QUICK_WINS: &str =
    "Quick wins: retarget recent visitors, run a 24-hour flash sale and boost ads on your best sellers.";

impl Heuristic for MarketingHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Marketing
    }

    fn name(&self) -> &'static str {
        "Marketing"
    }

    fn apply(&self, ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        if ctx.metrics.total_orders > 0 {
            report.recommend(QUICK_WINS);
        }
    }
}

/// Fixed operational checklist
pub struct OperationsHeuristic;

pub const OPERATIONS_CHECKLIST: &str =
    "Operational checklist: reconcile payments daily, review low-stock items weekly and confirm every pending shipment.";

impl Heuristic for OperationsHeuristic {
    fn id(&self) -> HeuristicKind {
        HeuristicKind::Operations
    }

    fn name(&self) -> &'static str {
        "Operations"
    }

    fn apply(&self, _ctx: &AnalysisContext<'_>, report: &mut ReportBuilder) {
        report.recommend(OPERATIONS_CHECKLIST);
    }
}
