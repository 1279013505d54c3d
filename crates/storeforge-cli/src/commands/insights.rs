//! Insights report command

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use storeforge_core::{InsightEngine, InsightReport};
use tracing::debug;

use super::core::{load_config, load_orders, load_products};

/// Parse `--now`, defaulting to the current time
pub fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --now timestamp '{}' (use RFC 3339)", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// Plain-text rendering of a report
pub fn render_report(report: &InsightReport) -> String {
    let mut out = format!("\n📊 {}\n", report.summary);

    let sections = [
        ("💡 Key insights", &report.key_insights),
        ("✅ Recommendations", &report.recommendations),
        ("⚠️  Warnings", &report.warnings),
    ];

    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}\n", title));
        out.push_str("   ─────────────────────────────────────────────────────────────\n");
        for item in items {
            out.push_str(&format!("   • {}\n", item));
        }
    }

    out
}

pub fn cmd_insights(
    config_path: Option<&Path>,
    orders_path: &Path,
    products_path: &Path,
    now: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let orders = load_orders(orders_path)?;
    let products = load_products(products_path)?;
    let now = parse_now(now)?;
    debug!(
        orders = orders.len(),
        products = products.len(),
        now = %now,
        "Loaded exports"
    );

    let report = InsightEngine::with_config(config).generate(&orders, &products, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}
