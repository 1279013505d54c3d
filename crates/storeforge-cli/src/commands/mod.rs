//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `automation` - Rule and alert listings, inventory rule preview
//! - `config` - Effective insight configuration
//! - `core` - Shared utilities (reading exports, loading config)
//! - `insights` - The business insights report
//! - `orders` - Order summary and search

pub mod automation;
pub mod config;
pub mod core;
pub mod insights;
pub mod orders;

// Re-export command functions for main.rs
pub use automation::*;
pub use config::*;
pub use core::*;
pub use insights::*;
pub use orders::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
