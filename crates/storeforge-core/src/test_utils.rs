//! Test utilities for storeforge-core
//!
//! Fixture builders shared by unit tests and the CLI tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::automation::{Alert, AlertStatus, AlertType, Rule, RuleStatus};
use crate::models::{Order, OrderStatus, PaymentStatus, Product};

/// Reference time used by every fixture
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 24, 12, 0, 0).unwrap()
}

/// A pending, unpaid order placed `days_ago` days before [`fixed_now`]
pub fn order_days_ago(id: &str, amount: f64, days_ago: i64) -> Order {
    Order::new(id, amount).with_created_at(fixed_now() - Duration::days(days_ago))
}

/// Three products: A low on stock and best selling, B well stocked, C sold out
pub fn scenario_products() -> Vec<Product> {
    vec![
        Product::new("a", "Product A", 10.0)
            .with_stock(5)
            .with_orders_received(20),
        Product::new("b", "Product B", 20.0)
            .with_stock(50)
            .with_orders_received(5),
        Product::new("c", "Product C", 5.0),
    ]
}

/// One delivered paid order and one pending unpaid order, both this week
pub fn scenario_orders() -> Vec<Order> {
    vec![
        order_days_ago("1", 150.0, 1)
            .with_status(OrderStatus::Delivered, PaymentStatus::Paid)
            .with_customer("Alice Johnson"),
        order_days_ago("2", 50.0, 2)
            .with_status(OrderStatus::Pending, PaymentStatus::Unpaid)
            .with_customer("Bob Williams"),
    ]
}

pub fn rule(id: i64, name: &str, trigger: &str, status: RuleStatus) -> Rule {
    Rule {
        id,
        name: name.to_string(),
        trigger: trigger.to_string(),
        action: "Notify store owner".to_string(),
        status,
        last_run: None,
    }
}

pub fn alert(id: i64, alert_type: AlertType, title: &str, status: AlertStatus) -> Alert {
    Alert {
        id,
        alert_type,
        title: title.to_string(),
        message: format!("{} needs attention", title),
        time: fixed_now(),
        status,
    }
}
