//! CLI argument definitions using clap
//!
//! This module contains all the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// StoreForge - Insights for your online store
#[derive(Parser)]
#[command(name = "storeforge")]
#[command(about = "Store dashboard tools: insights, order tracking and automation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Insight config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the business insights report
    Insights {
        /// Orders JSON export (array or {"orders": [...]})
        #[arg(short, long)]
        orders: PathBuf,

        /// Products JSON export (array or {"products": [...]})
        #[arg(short, long)]
        products: PathBuf,

        /// Reference time (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize and search orders
    Orders {
        /// Orders JSON export
        #[arg(short, long)]
        orders: PathBuf,

        /// Filter by order id or customer name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List automation rules and preview inventory alerts
    Rules {
        /// Rules JSON export (array or {"rules": [...]})
        #[arg(short, long)]
        rules: PathBuf,

        /// Products JSON export; when given, inventory rules are evaluated
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// Filter by rule name or trigger
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List alerts
    Alerts {
        /// Alerts JSON export (array or {"alerts": [...]})
        #[arg(short, long)]
        alerts: PathBuf,

        /// Only alerts of this type (warning, error, success, info)
        #[arg(short = 't', long = "type")]
        alert_type: Option<String>,

        /// Filter by title or message
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the effective insight configuration
    Config {
        /// Print the override file location instead
        #[arg(long)]
        path: bool,
    },
}
