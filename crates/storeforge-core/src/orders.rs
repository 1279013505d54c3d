//! Order tracking summaries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderStatus, PaymentStatus};

/// Counts and amounts for the order tracking view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total_orders: usize,
    pub total_revenue: f64,
    /// Orders per fulfillment status (every status present, possibly 0)
    pub by_order_status: BTreeMap<String, usize>,
    /// Orders per payment status (every status present, possibly 0)
    pub by_payment_status: BTreeMap<String, usize>,
    /// Value of unpaid orders
    pub outstanding_amount: f64,
    /// Value of refunded orders
    pub refunded_amount: f64,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut by_order_status: BTreeMap<String, usize> = OrderStatus::all()
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut by_payment_status: BTreeMap<String, usize> = PaymentStatus::all()
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();

        let mut summary = Self {
            total_orders: orders.len(),
            total_revenue: 0.0,
            by_order_status: BTreeMap::new(),
            by_payment_status: BTreeMap::new(),
            outstanding_amount: 0.0,
            refunded_amount: 0.0,
        };

        for order in orders {
            let amount = order.amount();
            summary.total_revenue += amount;
            *by_order_status
                .entry(order.order_status.as_str().to_string())
                .or_default() += 1;
            *by_payment_status
                .entry(order.payment_status.as_str().to_string())
                .or_default() += 1;

            match order.payment_status {
                PaymentStatus::Unpaid => summary.outstanding_amount += amount,
                PaymentStatus::Refunded => summary.refunded_amount += amount,
                PaymentStatus::Paid => {}
            }
        }

        summary.by_order_status = by_order_status;
        summary.by_payment_status = by_payment_status;
        summary
    }

    pub fn count_for_status(&self, status: OrderStatus) -> usize {
        self.by_order_status.get(status.as_str()).copied().unwrap_or(0)
    }

    pub fn count_for_payment(&self, status: PaymentStatus) -> usize {
        self.by_payment_status.get(status.as_str()).copied().unwrap_or(0)
    }
}

/// Orders whose id or customer name contains `search` (case-insensitive)
pub fn filter_orders<'a>(orders: &'a [Order], search: &str) -> Vec<&'a Order> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return orders.iter().collect();
    }

    orders
        .iter()
        .filter(|o| {
            o.id.to_lowercase().contains(&needle)
                || o
                    .customer_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}
