//! Configuration management for the Beverage Container Tracking Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CT_ prefix

use std::collections::HashMap;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::alerts::AlertThresholds;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Board behaviour configuration
    pub board: BoardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    /// Reorder point used for products without an explicit one
    pub low_stock_threshold: u32,

    /// Days a delivered container may sit at a customer before its return
    /// is overdue
    pub overdue_return_days: i64,

    /// Per-product reorder points, keyed by product name
    #[serde(default)]
    pub reorder_points: HashMap<String, u32>,
}

impl BoardConfig {
    /// Thresholds in the shape the alert engine consumes
    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            default_low_stock: self.low_stock_threshold,
            per_product: self.reorder_points.clone(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("board.low_stock_threshold", 5)?
            .set_default("board.overdue_return_days", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CT_ prefix)
            .add_source(
                Environment::with_prefix("CT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
            overdue_return_days: 30,
            reorder_points: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_from_board_config() {
        let mut board = BoardConfig::default();
        board.reorder_points.insert("Dry Cider".to_string(), 12);

        let thresholds = board.thresholds();
        assert_eq!(thresholds.reorder_point("Dry Cider"), 12);
        assert_eq!(thresholds.reorder_point("Hopped Cider"), 5);
    }
}
