//! Record normalization for REST payloads
//!
//! The backend is loose about shapes: ids may be numbers or strings, numeric
//! fields may arrive as strings or be missing, and field names come in both
//! camelCase and snake_case. Everything is coerced here, once, so the rest of
//! the crate works with clean [`Order`] and [`Product`] values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Order, OrderItem, OrderStatus, PaymentStatus, Product};

/// Clamp a monetary amount: negative or non-finite values become 0
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Coerce a JSON value to a number, using `fallback` when it is missing,
/// null, non-numeric or not finite
pub fn coerce_number(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_numeric_str(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Coerce a JSON value to a non-negative monetary amount
pub fn coerce_amount(value: Option<&Value>) -> f64 {
    sanitize_amount(coerce_number(value, 0.0))
}

/// Coerce a JSON value to a non-negative integer count (fractions truncated)
pub fn coerce_count(value: Option<&Value>) -> u64 {
    let n = coerce_number(value, 0.0);
    if n > 0.0 {
        n.trunc() as u64
    } else {
        0
    }
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().replace(['$', ',', ' '], "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parse a backend timestamp
///
/// Accepts RFC 3339, naive date-times (assumed UTC) and bare dates
/// (midnight UTC). Anything else yields None.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// First non-null value among the given key aliases
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn coerce_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Unwrap a top-level document: either a bare array or `{ "<key>": [...] }`
pub(crate) fn extract_list(doc: Value, key: &str) -> Result<Vec<Value>> {
    match doc {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(Error::InvalidData(format!(
                "expected an array or an object with a \"{}\" array",
                key
            ))),
        },
        _ => Err(Error::InvalidData(format!(
            "expected an array of {} records",
            key
        ))),
    }
}

/// Build a product from a raw record; None when the record has no id
pub fn product_from_json(value: &Value) -> Option<Product> {
    let obj = value.as_object()?;
    let id = coerce_id(field(obj, &["id", "product_id", "productId"]))?;

    Some(Product {
        id,
        name: coerce_string(field(obj, &["name", "title"])).unwrap_or_default(),
        price: coerce_amount(field(obj, &["price"])),
        stock: coerce_count(field(obj, &["stock"])),
        orders_received: coerce_count(field(obj, &["ordersReceived", "orders_received"])),
        description: coerce_string(field(obj, &["description"])),
        image_url: coerce_string(field(obj, &["imageUrl", "image_url"])),
    })
}

fn item_from_json(value: &Value) -> Option<OrderItem> {
    let obj = value.as_object()?;
    let product_id = coerce_id(field(obj, &["productId", "product_id"]));
    let name = coerce_string(field(obj, &["name", "productName"])).unwrap_or_else(|| {
        format!("Product {}", product_id.as_deref().unwrap_or("?"))
    });

    Some(OrderItem {
        product_id,
        name,
        price: coerce_amount(field(obj, &["unitPrice", "unit_price", "price"])),
        quantity: coerce_count(field(obj, &["quantity"])),
        total_price: coerce_amount(field(obj, &["totalPrice", "total_price"])),
    })
}

fn parse_status<T>(value: Option<&Value>, what: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value.and_then(Value::as_str) {
        Some(s) => s.parse().unwrap_or_else(|e: String| {
            debug!(field = what, error = %e, "Unrecognized status, using default");
            T::default()
        }),
        None => T::default(),
    }
}

/// Build an order from a raw record; None when the record is not an object
pub fn order_from_json(value: &Value) -> Option<Order> {
    let obj = value.as_object()?;

    let items: Vec<OrderItem> = field(obj, &["items"])
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(item_from_json).collect())
        .unwrap_or_default();

    let mut order = Order {
        id: coerce_id(field(obj, &["id", "orderId", "order_id"])).unwrap_or_else(|| "0".to_string()),
        customer_name: coerce_string(field(obj, &["customerName", "customer_name"])),
        total_amount: 0.0,
        order_status: parse_status::<OrderStatus>(
            field(obj, &["orderStatus", "order_status"]),
            "orderStatus",
        ),
        payment_status: parse_status::<PaymentStatus>(
            field(obj, &["paymentStatus", "payment_status"]),
            "paymentStatus",
        ),
        created_at: field(obj, &["createdAt", "created_at", "orderDate", "order_date"])
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
        items,
    };

    order.total_amount = match field(obj, &["totalAmount", "total_amount"]) {
        Some(v) => coerce_amount(Some(v)),
        None => order.items_total(),
    };

    Some(order)
}

/// Parse a products document (array or `{ "products": [...] }`)
pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    let doc: Value = serde_json::from_str(json)?;
    let records = extract_list(doc, "products")?;
    let total = records.len();

    let products: Vec<Product> = records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let product = product_from_json(record);
            if product.is_none() {
                warn!(index = idx, "Skipping product record without a usable id");
            }
            product
        })
        .collect();

    debug!(total, kept = products.len(), "Parsed products");
    Ok(products)
}

/// Parse an orders document (array or `{ "orders": [...] }`)
pub fn parse_orders(json: &str) -> Result<Vec<Order>> {
    let doc: Value = serde_json::from_str(json)?;
    let records = extract_list(doc, "orders")?;
    let total = records.len();

    let orders: Vec<Order> = records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let order = order_from_json(record);
            if order.is_none() {
                warn!(index = idx, "Skipping order record that is not an object");
            }
            order
        })
        .collect();

    debug!(total, kept = orders.len(), "Parsed orders");
    Ok(orders)
}
