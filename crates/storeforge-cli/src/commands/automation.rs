//! Automation commands: rules and alerts

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use storeforge_core::{
    evaluate_inventory_rules, filter_alerts, filter_rules, parse_alerts, parse_rules, AlertStatus,
    AlertType, AutomationStats,
};

use super::core::{load_products, read_export};
use super::truncate;

fn type_icon(alert_type: AlertType) -> &'static str {
    match alert_type {
        AlertType::Warning => "⚠️ ",
        AlertType::Error => "❌",
        AlertType::Success => "✅",
        AlertType::Info => "ℹ️ ",
    }
}

pub fn cmd_rules(rules_path: &Path, products_path: Option<&Path>, search: &str) -> Result<()> {
    let content = read_export(rules_path)?;
    let rules = parse_rules(&content)
        .with_context(|| format!("Invalid rules export {}", rules_path.display()))?;
    let stats = AutomationStats::compute(&rules, &[]);

    println!();
    println!("🤖 Automation rules");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {} rules, {} active",
        stats.total_rules, stats.active_rules
    );
    println!();

    let matches = filter_rules(&rules, search);
    if matches.is_empty() {
        println!("   No rules match '{}'.", search);
    }
    for rule in &matches {
        println!(
            "   #{:<4} {:<28} {:<8} {}",
            rule.id,
            truncate(&rule.name, 28),
            rule.status.as_str(),
            rule.trigger
        );
        println!("         → {}", rule.action);
    }

    if let Some(path) = products_path {
        let products = load_products(path)?;
        let alerts = evaluate_inventory_rules(&rules, &products, Utc::now());

        println!();
        if alerts.is_empty() {
            println!("✅ No inventory rules would fire for this catalog.");
        } else {
            println!("🔔 Alerts these rules would raise");
            println!("   ─────────────────────────────────────────────────────────────");
            for alert in &alerts {
                println!("   {} {}", type_icon(alert.alert_type), alert.title);
                println!("      {}", alert.message);
            }
        }
    }

    Ok(())
}

pub fn cmd_alerts(alerts_path: &Path, alert_type: Option<&str>, search: &str) -> Result<()> {
    let alert_type = alert_type
        .map(|t| t.parse::<AlertType>().map_err(|e| anyhow::anyhow!(e)))
        .transpose()?;

    let content = read_export(alerts_path)?;
    let alerts = parse_alerts(&content)
        .with_context(|| format!("Invalid alerts export {}", alerts_path.display()))?;
    let stats = AutomationStats::compute(&[], &alerts);

    let matches = filter_alerts(&alerts, search, alert_type);
    if matches.is_empty() {
        println!("✅ No matching alerts.");
        return Ok(());
    }

    println!();
    println!(
        "🔔 Alerts ({} total, {} unread, {} warnings, {} errors)",
        stats.total_alerts, stats.unread, stats.warnings, stats.errors
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for alert in matches {
        let unread_mark = if alert.status == AlertStatus::Unread {
            " (unread)"
        } else {
            ""
        };
        println!(
            "   {} {}{}  {}",
            type_icon(alert.alert_type),
            alert.title,
            unread_mark,
            alert.time.format("%Y-%m-%d %H:%M")
        );
        println!("      {}", alert.message);
        println!();
    }

    Ok(())
}
