//! Insight configuration commands

use std::path::Path;

use anyhow::Result;
use storeforge_core::insights::default_config_path;

use super::core::load_config;

pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path() -> Result<()> {
    match default_config_path() {
        Some(path) => {
            println!("{}", path.display());

            if !path.exists() {
                eprintln!();
                eprintln!("Note: This file does not exist yet.");
                eprintln!("Create it to override the built-in thresholds.");
            }
        }
        None => {
            eprintln!("Could not determine config directory.");
            eprintln!("The data directory is not available on this system.");
        }
    }

    Ok(())
}
