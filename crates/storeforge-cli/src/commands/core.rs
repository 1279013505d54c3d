//! Shared utilities for commands
//!
//! - `read_export` - Read a JSON export file
//! - `load_config` - Resolve the insight engine configuration
//! - `load_orders` / `load_products` - Read and normalize exports

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use storeforge_core::{parse_orders, parse_products, InsightConfig, Order, Product};

pub fn read_export(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<InsightConfig> {
    InsightConfig::load(path).context("Failed to load insight config")
}

pub fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let content = read_export(path)?;
    parse_orders(&content).with_context(|| format!("Invalid orders export {}", path.display()))
}

pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    let content = read_export(path)?;
    parse_products(&content).with_context(|| format!("Invalid products export {}", path.display()))
}
