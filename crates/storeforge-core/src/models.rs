//! Domain models for StoreForge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::sanitize_amount;

/// Fulfillment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn all() -> &'static [OrderStatus] {
        &[Self::Pending, Self::Delivered, Self::Cancelled]
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::Paid => "Paid",
            Self::Refunded => "Refunded",
        }
    }

    pub fn all() -> &'static [PaymentStatus] {
        &[Self::Unpaid, Self::Paid, Self::Refunded]
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A line item on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Option<String>,
    pub name: String,
    pub price: f64,
    pub quantity: u64,
    pub total_price: f64,
}

impl OrderItem {
    /// Line total, falling back to price × quantity when the backend omits it
    pub fn line_total(&self) -> f64 {
        let total = sanitize_amount(self.total_price);
        if total > 0.0 {
            total
        } else {
            sanitize_amount(self.price) * self.quantity as f64
        }
    }
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// When the order was placed; None when absent or unparseable
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new(id: impl Into<String>, total_amount: f64) -> Self {
        Self {
            id: id.into(),
            customer_name: None,
            total_amount,
            order_status: OrderStatus::default(),
            payment_status: PaymentStatus::default(),
            created_at: None,
            items: Vec::new(),
        }
    }

    pub fn with_status(mut self, order_status: OrderStatus, payment_status: PaymentStatus) -> Self {
        self.order_status = order_status;
        self.payment_status = payment_status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_customer(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(customer_name.into());
        self
    }

    /// Order total with negative or non-finite amounts treated as 0
    pub fn amount(&self) -> f64 {
        sanitize_amount(self.total_amount)
    }

    /// Sum of line item totals
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    /// Units on hand
    #[serde(default)]
    pub stock: u64,
    /// Units/orders attributed to this product
    #[serde(default)]
    pub orders_received: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: 0,
            orders_received: 0,
            description: None,
            image_url: None,
        }
    }

    pub fn with_stock(mut self, stock: u64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_orders_received(mut self, orders_received: u64) -> Self {
        self.orders_received = orders_received;
        self
    }

    /// Revenue attributed to this product: price × orders received
    pub fn attributed_revenue(&self) -> f64 {
        sanitize_amount(self.price) * self.orders_received as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_parsing() {
        assert_eq!(OrderStatus::from_str("delivered").unwrap(), OrderStatus::Delivered);
        assert_eq!(OrderStatus::from_str("Canceled").unwrap(), OrderStatus::Cancelled);
        assert!(OrderStatus::from_str("shipped").is_err());
        assert_eq!(PaymentStatus::from_str(" PAID ").unwrap(), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_order_amount_sanitized() {
        assert_eq!(Order::new("1", -20.0).amount(), 0.0);
        assert_eq!(Order::new("2", f64::NAN).amount(), 0.0);
        assert_eq!(Order::new("3", 42.5).amount(), 42.5);
    }

    #[test]
    fn test_item_line_total_fallback() {
        let item = OrderItem {
            product_id: Some("p1".to_string()),
            name: "Theme".to_string(),
            price: 12.5,
            quantity: 4,
            total_price: 0.0,
        };
        assert_eq!(item.line_total(), 50.0);
    }

    #[test]
    fn test_product_attributed_revenue() {
        let product = Product::new("p1", "Theme", 10.0).with_orders_received(20);
        assert_eq!(product.attributed_revenue(), 200.0);
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order::new("7", 10.0).with_status(OrderStatus::Delivered, PaymentStatus::Paid);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["totalAmount"], 10.0);
        assert_eq!(json["orderStatus"], "Delivered");
        assert_eq!(json["paymentStatus"], "Paid");
    }
}
