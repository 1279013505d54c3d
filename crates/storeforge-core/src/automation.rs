//! Automation rules and alerts
//!
//! Rules are stored by the backend with a free-text trigger such as
//! `"Inventory below 10 units"`. This module parses those triggers, computes
//! the panel statistics, filters rules and alerts, and evaluates inventory
//! rules against the current catalog.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Product;
use crate::normalize::extract_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    #[default]
    Active,
    Paused,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An automation rule as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: i64,
    pub name: String,
    /// Free-text trigger, see [`Trigger`]
    pub trigger: String,
    pub action: String,
    #[serde(default)]
    pub status: RuleStatus,
    #[serde(default)]
    pub last_run: Option<String>,
}

impl Rule {
    pub fn parsed_trigger(&self) -> Result<Trigger> {
        self.trigger.parse()
    }
}

/// Comparison used by inventory triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Below,
    Above,
    Equals,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Above => "above",
            Self::Equals => "equals",
        }
    }

    pub fn matches(&self, actual: u64, value: u64) -> bool {
        match self {
            Self::Below => actual < value,
            Self::Above => actual > value,
            Self::Equals => actual == value,
        }
    }
}

/// Parsed rule trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fires per product whose stock satisfies the condition
    Inventory { condition: Condition, value: u64 },
    /// Scheduled by the backend
    Time,
    /// Fired by order events on the backend
    Order,
    /// Fired by price changes on the backend
    Price,
}

impl FromStr for Trigger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "time" => return Ok(Self::Time),
            "order" => return Ok(Self::Order),
            "price" => return Ok(Self::Price),
            _ => {}
        }

        let re = Regex::new(r"(?i)^inventory\s+(below|above|equals)\s+(\d+)(?:\s+units?)?$")
            .expect("valid regex");
        let caps = re
            .captures(trimmed)
            .ok_or_else(|| Error::InvalidRule(format!("Unrecognized trigger: {}", s)))?;

        let condition = match caps[1].to_lowercase().as_str() {
            "below" => Condition::Below,
            "above" => Condition::Above,
            _ => Condition::Equals,
        };
        let value = caps[2]
            .parse::<u64>()
            .map_err(|e| Error::InvalidRule(format!("Bad inventory value in {:?}: {}", s, e)))?;

        Ok(Self::Inventory { condition, value })
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory { condition, value } => {
                write!(f, "Inventory {} {} units", condition.as_str(), value)
            }
            Self::Time => write!(f, "time"),
            Self::Order => write!(f, "order"),
            Self::Price => write!(f, "price"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Warning,
    Error,
    Success,
    Info,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warning" | "warnings" => Ok(Self::Warning),
            "error" | "errors" => Ok(Self::Error),
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            _ => Err(format!("Unknown alert type: {}", s)),
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Unread,
    Read,
}

/// An alert raised by a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub title: String,
    pub message: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub status: AlertStatus,
}

/// Parse a rules document (array or `{ "rules": [...] }`)
pub fn parse_rules(json: &str) -> Result<Vec<Rule>> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    let records = extract_list(doc, "rules")?;
    Ok(serde_json::from_value(serde_json::Value::Array(records))?)
}

/// Parse an alerts document (array or `{ "alerts": [...] }`)
pub fn parse_alerts(json: &str) -> Result<Vec<Alert>> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    let records = extract_list(doc, "alerts")?;
    Ok(serde_json::from_value(serde_json::Value::Array(records))?)
}

/// Headline numbers for the automation panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationStats {
    pub total_rules: usize,
    pub active_rules: usize,
    pub total_alerts: usize,
    pub warnings: usize,
    pub errors: usize,
    pub unread: usize,
}

impl AutomationStats {
    pub fn compute(rules: &[Rule], alerts: &[Alert]) -> Self {
        let count_type = |t: AlertType| alerts.iter().filter(|a| a.alert_type == t).count();
        Self {
            total_rules: rules.len(),
            active_rules: rules
                .iter()
                .filter(|r| r.status == RuleStatus::Active)
                .count(),
            total_alerts: alerts.len(),
            warnings: count_type(AlertType::Warning),
            errors: count_type(AlertType::Error),
            unread: alerts
                .iter()
                .filter(|a| a.status == AlertStatus::Unread)
                .count(),
        }
    }
}

/// Rules whose name or trigger contains `search` (case-insensitive)
pub fn filter_rules<'a>(rules: &'a [Rule], search: &str) -> Vec<&'a Rule> {
    let needle = search.trim().to_lowercase();
    rules
        .iter()
        .filter(|r| {
            needle.is_empty()
                || r.name.to_lowercase().contains(&needle)
                || r.trigger.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Alerts matching `search` on title or message, optionally of one type
pub fn filter_alerts<'a>(
    alerts: &'a [Alert],
    search: &str,
    alert_type: Option<AlertType>,
) -> Vec<&'a Alert> {
    let needle = search.trim().to_lowercase();
    alerts
        .iter()
        .filter(|a| alert_type.map_or(true, |t| a.alert_type == t))
        .filter(|a| {
            needle.is_empty()
                || a.title.to_lowercase().contains(&needle)
                || a.message.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Alerts that active inventory rules raise for the given catalog
///
/// Paused rules and non-inventory triggers are ignored; unparseable triggers
/// are skipped with a warning. Ids run from 1 in rule-then-product order.
pub fn evaluate_inventory_rules(
    rules: &[Rule],
    products: &[Product],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for rule in rules.iter().filter(|r| r.status == RuleStatus::Active) {
        let trigger = match rule.parsed_trigger() {
            Ok(trigger) => trigger,
            Err(e) => {
                warn!(rule_id = rule.id, error = %e, "Skipping rule with unparseable trigger");
                continue;
            }
        };

        let Trigger::Inventory { condition, value } = trigger else {
            continue;
        };

        let before = alerts.len();
        for product in products.iter().filter(|p| condition.matches(p.stock, value)) {
            let alert_type = match condition {
                _ if product.stock == 0 => AlertType::Error,
                Condition::Below => AlertType::Warning,
                _ => AlertType::Info,
            };

            alerts.push(Alert {
                id: alerts.len() as i64 + 1,
                alert_type,
                title: rule.name.clone(),
                message: format!(
                    "{} has {} units in stock ({}). Action: {}",
                    product.name, product.stock, trigger, rule.action
                ),
                time: now,
                status: AlertStatus::Unread,
            });
        }

        debug!(
            rule_id = rule.id,
            alerts = alerts.len() - before,
            "Inventory rule evaluated"
        );
    }

    alerts
}
