//! Aggregate store metrics
//!
//! Everything is recomputed from the inputs on each call; nothing is cached
//! between reports.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Order, OrderStatus, PaymentStatus, Product};

use super::config::InsightConfig;
use super::format::{money, round_to, signed_percent};

/// Snapshot of a product as it appears in a metric list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStanding {
    pub id: String,
    pub name: String,
    pub stock: u64,
    pub orders_received: u64,
    pub price: f64,
}

impl From<&Product> for ProductStanding {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            stock: p.stock,
            orders_received: p.orders_received,
            price: p.price,
        }
    }
}

/// Revenue in the two trailing windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueWindows {
    /// `[now - window, now)`
    pub last: f64,
    /// `[now - 2 * window, now - window)`
    pub previous: f64,
}

impl RevenueWindows {
    /// Sum order revenue into half-open windows ending at `now`
    ///
    /// Orders without a timestamp, or stamped at/after `now`, fall in neither.
    /// A window too long to represent leaves both sums at zero.
    pub fn compute(orders: &[Order], now: DateTime<Utc>, window_days: i64) -> Self {
        let mut windows = Self {
            last: 0.0,
            previous: 0.0,
        };

        let bounds = Duration::try_days(window_days).and_then(|window| {
            let last_start = now.checked_sub_signed(window)?;
            let previous_start = last_start.checked_sub_signed(window)?;
            Some((last_start, previous_start))
        });
        let Some((last_start, previous_start)) = bounds else {
            warn!(window_days, "Revenue window out of range, treating both windows as empty");
            return windows;
        };

        for order in orders {
            let Some(created_at) = order.created_at else {
                continue;
            };
            if created_at >= last_start && created_at < now {
                windows.last += order.amount();
            } else if created_at >= previous_start && created_at < last_start {
                windows.previous += order.amount();
            }
        }

        windows
    }

    /// Percent change from the previous window to the last, 2 decimals
    pub fn percent_change(&self) -> f64 {
        percent_change(self.previous, self.last)
    }
}

/// Percent change with a saturating zero baseline
///
/// A zero baseline yields 0 when the new value is also zero, else a flat 100.
pub fn percent_change(previous: f64, last: f64) -> f64 {
    if previous == 0.0 {
        if last == 0.0 {
            0.0
        } else {
            100.0
        }
    } else {
        round_to((last - previous) / previous.abs() * 100.0, 2)
    }
}

/// Headline numbers every heuristic reads from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMetrics {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub avg_order_value: f64,
    /// Products under the low-stock threshold, in input order
    pub low_stock: Vec<ProductStanding>,
    /// Best sellers by orders received (ties keep input order)
    pub top_products: Vec<ProductStanding>,
    /// Attributed revenue of `top_products`
    pub top_revenue: f64,
    /// Attributed revenue across the whole catalog (unsubstituted)
    pub product_revenue_total: f64,
    /// Share of attributed revenue from `top_products`, 1 decimal
    pub top_share_pct: f64,
    pub unpaid_count: usize,
    pub pending_count: usize,
    pub revenue_windows: RevenueWindows,
    /// Week-over-week revenue change, 2 decimals
    pub pct_change: f64,
}

impl StoreMetrics {
    pub fn compute(
        orders: &[Order],
        products: &[Product],
        now: DateTime<Utc>,
        config: &InsightConfig,
    ) -> Self {
        let total_revenue: f64 = orders.iter().map(Order::amount).sum();
        let total_orders = orders.len();
        let avg_order_value = if total_orders > 0 {
            total_revenue / total_orders as f64
        } else {
            0.0
        };

        let low_stock: Vec<ProductStanding> = products
            .iter()
            .filter(|p| p.stock < config.low_stock_threshold)
            .map(ProductStanding::from)
            .collect();

        // sort_by is stable, so equal order counts keep their input order
        let mut ranked: Vec<&Product> = products.iter().collect();
        ranked.sort_by(|a, b| b.orders_received.cmp(&a.orders_received));
        let top: Vec<&Product> = ranked.into_iter().take(config.top_products).collect();

        let top_revenue: f64 = top.iter().map(|p| p.attributed_revenue()).sum();
        let product_revenue_total: f64 = products.iter().map(Product::attributed_revenue).sum();
        let share_base = if product_revenue_total == 0.0 {
            1.0
        } else {
            product_revenue_total
        };
        let top_share_pct = round_to(top_revenue / share_base * 100.0, 1);

        let unpaid_count = orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Unpaid)
            .count();
        let pending_count = orders
            .iter()
            .filter(|o| o.order_status == OrderStatus::Pending)
            .count();

        let revenue_windows = RevenueWindows::compute(orders, now, config.window_days);
        let pct_change = revenue_windows.percent_change();

        Self {
            total_revenue,
            total_orders,
            avg_order_value,
            low_stock,
            top_products: top.into_iter().map(ProductStanding::from).collect(),
            top_revenue,
            product_revenue_total,
            top_share_pct,
            unpaid_count,
            pending_count,
            revenue_windows,
            pct_change,
        }
    }

    /// The report's summary line
    pub fn summary_line(&self, window_days: i64) -> String {
        [
            format!(
                "Revenue {} • AOV {}",
                money(self.total_revenue),
                money(self.avg_order_value)
            ),
            format!("Low stock: {}", self.low_stock.len()),
            format!(
                "Unpaid: {}, Pending: {}",
                self.unpaid_count, self.pending_count
            ),
            format!(
                "{}-day change: {}",
                window_days,
                signed_percent(self.pct_change, 2)
            ),
        ]
        .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 24, 12, 0, 0).unwrap()
    }

    fn order_at(id: &str, amount: f64, days_ago: i64) -> Order {
        Order::new(id, amount).with_created_at(now() - Duration::days(days_ago))
    }

    #[test]
    fn test_revenue_and_aov() {
        let orders = vec![
            Order::new("1", 100.0),
            Order::new("2", 200.0),
            Order::new("3", 0.0),
        ];
        let products = vec![Product::new("p", "P", 1.0).with_stock(20)];
        let metrics = StoreMetrics::compute(&orders, &products, now(), &InsightConfig::default());

        assert_eq!(metrics.total_revenue, 300.0);
        assert_eq!(metrics.total_orders, 3);
        assert_eq!(metrics.avg_order_value, 100.0);
    }

    #[test]
    fn test_aov_without_orders_is_zero() {
        let products = vec![Product::new("p", "P", 1.0)];
        let metrics = StoreMetrics::compute(&[], &products, now(), &InsightConfig::default());
        assert_eq!(metrics.avg_order_value, 0.0);
        assert_eq!(metrics.pct_change, 0.0);
    }

    #[test]
    fn test_low_stock_threshold_is_strict() {
        let products = vec![
            Product::new("a", "Nine", 1.0).with_stock(9),
            Product::new("b", "Ten", 1.0).with_stock(10),
        ];
        let metrics = StoreMetrics::compute(&[], &products, now(), &InsightConfig::default());
        let ids: Vec<&str> = metrics.low_stock.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_top_products_stable_ties() {
        let products: Vec<Product> = (0..7)
            .map(|i| {
                let orders = if i == 3 { 50 } else { 10 };
                Product::new(format!("p{}", i), format!("P{}", i), 1.0).with_orders_received(orders)
            })
            .collect();
        let metrics = StoreMetrics::compute(&[], &products, now(), &InsightConfig::default());
        let ids: Vec<&str> = metrics.top_products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p0", "p1", "p2", "p4"]);
    }

    #[test]
    fn test_top_share_zero_guard() {
        let products = vec![
            Product::new("a", "A", 10.0),
            Product::new("b", "B", 20.0),
        ];
        let metrics = StoreMetrics::compute(&[], &products, now(), &InsightConfig::default());
        assert_eq!(metrics.product_revenue_total, 0.0);
        assert_eq!(metrics.top_share_pct, 0.0);
    }

    #[test]
    fn test_top_share_rounding() {
        let products = vec![
            Product::new("a", "A", 1.0).with_orders_received(5),
            Product::new("b", "B", 1.0).with_orders_received(1),
        ];
        let config = InsightConfig {
            top_products: 1,
            ..Default::default()
        };
        let metrics = StoreMetrics::compute(&[], &products, now(), &config);
        assert_eq!(metrics.top_share_pct, 83.3);
    }

    #[test]
    fn test_percent_change_saturation() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(0.0, 500.0), 100.0);
        assert_eq!(percent_change(200.0, 250.0), 25.0);
        assert_eq!(percent_change(300.0, 200.0), -33.33);
    }

    #[test]
    fn test_windows_are_half_open() {
        let orders = vec![
            order_at("today", 10.0, 0),
            order_at("boundary", 20.0, 7),
            order_at("prev", 40.0, 10),
            order_at("prev-edge", 80.0, 14),
            order_at("old", 160.0, 15),
            Order::new("undated", 320.0),
        ];

        let windows = RevenueWindows::compute(&orders, now(), 7);
        // "today" sits exactly at now and is excluded; "boundary" belongs to the last window
        assert_eq!(windows.last, 20.0);
        assert_eq!(windows.previous, 120.0);
    }

    #[test]
    fn test_oversized_window_is_empty() {
        let orders = vec![order_at("recent", 10.0, 1), order_at("older", 20.0, 9)];

        let windows = RevenueWindows::compute(&orders, now(), 200_000_000);
        assert_eq!(windows.last, 0.0);
        assert_eq!(windows.previous, 0.0);

        let windows = RevenueWindows::compute(&orders, now(), i64::MAX);
        assert_eq!(windows.percent_change(), 0.0);
    }

    #[test]
    fn test_summary_line() {
        let orders = vec![
            Order::new("1", 150.0).with_status(OrderStatus::Delivered, PaymentStatus::Paid),
            Order::new("2", 50.0),
        ];
        let products = vec![Product::new("p", "P", 1.0).with_stock(3)];
        let metrics = StoreMetrics::compute(&orders, &products, now(), &InsightConfig::default());

        assert_eq!(
            metrics.summary_line(7),
            "Revenue $200.00 • AOV $100.00 | Low stock: 1 | Unpaid: 1, Pending: 1 | 7-day change: +0.00%"
        );
    }
}
