//! Order tracking command

use std::path::Path;

use anyhow::Result;
use storeforge_core::{filter_orders, OrderSummary};

use super::core::load_orders;
use super::truncate;

pub fn cmd_orders(orders_path: &Path, search: &str) -> Result<()> {
    let orders = load_orders(orders_path)?;
    let summary = OrderSummary::from_orders(&orders);

    println!();
    println!("📦 Orders");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {} orders, ${:.2} revenue, ${:.2} outstanding, ${:.2} refunded",
        summary.total_orders,
        summary.total_revenue,
        summary.outstanding_amount,
        summary.refunded_amount
    );
    let statuses: Vec<String> = summary
        .by_order_status
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect();
    let payments: Vec<String> = summary
        .by_payment_status
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect();
    println!("   Status:  {}", statuses.join(", "));
    println!("   Payment: {}", payments.join(", "));
    println!();

    let matches = filter_orders(&orders, search);
    if matches.is_empty() {
        println!("   No orders match '{}'.", search);
        return Ok(());
    }

    println!(
        "   {:>8}  {:<24}  {:>10}  {:<10}  {:<8}  {}",
        "ID", "Customer", "Amount", "Status", "Payment", "Placed"
    );
    for order in matches {
        let placed = order
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:>8}  {:<24}  {:>10.2}  {:<10}  {:<8}  {}",
            truncate(&order.id, 8),
            truncate(order.customer_name.as_deref().unwrap_or("-"), 24),
            order.amount(),
            order.order_status.as_str(),
            order.payment_status.as_str(),
            placed
        );
    }

    Ok(())
}
