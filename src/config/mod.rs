//! Configuration module for the fleet console core.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;

use crate::grid::SortDirection;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the fleet backend
    pub base_url: String,
    /// API key sent with every backend request (optional in dev setups)
    pub api_key: Option<String>,
    /// Printer grid column count
    pub grid_cols: usize,
    /// Printer grid row count
    pub grid_rows: usize,
    /// Fill direction for name-sorted grid layout
    pub grid_sort_direction: SortDirection,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = env::var("PRINTFLEET_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:4000".to_string());

        let api_key = env::var("PRINTFLEET_API_KEY").ok();

        let grid_cols = env::var("PRINTFLEET_GRID_COLS")
            .unwrap_or_else(|_| "4".to_string())
            .parse()
            .expect("Invalid PRINTFLEET_GRID_COLS format");

        let grid_rows = env::var("PRINTFLEET_GRID_ROWS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .expect("Invalid PRINTFLEET_GRID_ROWS format");

        let grid_sort_direction = match env::var("PRINTFLEET_GRID_SORT")
            .unwrap_or_else(|_| "horizontal".to_string())
            .to_lowercase()
            .as_str()
        {
            "vertical" => SortDirection::Vertical,
            _ => SortDirection::Horizontal,
        };

        let log_level = env::var("PRINTFLEET_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            base_url,
            api_key,
            grid_cols,
            grid_rows,
            grid_sort_direction,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("PRINTFLEET_BASE_URL");
        env::remove_var("PRINTFLEET_API_KEY");
        env::remove_var("PRINTFLEET_GRID_COLS");
        env::remove_var("PRINTFLEET_GRID_ROWS");
        env::remove_var("PRINTFLEET_GRID_SORT");
        env::remove_var("PRINTFLEET_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.base_url, "http://127.0.0.1:4000");
        assert!(config.api_key.is_none());
        assert_eq!(config.grid_cols, 4);
        assert_eq!(config.grid_rows, 3);
        assert_eq!(config.grid_sort_direction, SortDirection::Horizontal);
        assert_eq!(config.log_level, "info");
    }
}
