//! StoreForge CLI - Store insights and automation
//!
//! Usage:
//!   storeforge insights --orders orders.json --products products.json
//!   storeforge orders --orders orders.json --search alice
//!   storeforge rules --rules rules.json --products products.json
//!   storeforge alerts --alerts alerts.json --type warning
//!   storeforge config

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Insights {
            orders,
            products,
            now,
            json,
        } => commands::cmd_insights(config_path, &orders, &products, now.as_deref(), json),
        Commands::Orders { orders, search } => {
            commands::cmd_orders(&orders, search.as_deref().unwrap_or(""))
        }
        Commands::Rules {
            rules,
            products,
            search,
        } => commands::cmd_rules(
            &rules,
            products.as_deref(),
            search.as_deref().unwrap_or(""),
        ),
        Commands::Alerts {
            alerts,
            alert_type,
            search,
        } => commands::cmd_alerts(
            &alerts,
            alert_type.as_deref(),
            search.as_deref().unwrap_or(""),
        ),
        Commands::Config { path } => {
            if path {
                commands::cmd_config_path()
            } else {
                commands::cmd_config_show(config_path)
            }
        }
    }
}
