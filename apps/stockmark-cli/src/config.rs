//! # Harness Configuration
//!
//! Stock display settings and the log filter for the `stockmark` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKMARK_LOW_STOCK_BELOW=5                                        │
//! │     STOCKMARK_OUT_OF_STOCK_LABEL="Sold out"                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/stockmark/stockmark.toml (Linux)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     thresholds 10 / 20, "Habis", "Stok", 3000 ms / 4000 ms             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [stock]
//! low_below = 10.0
//! medium_max = 20.0
//!
//! [display]
//! out_of_stock_label = "Habis"
//! in_stock_prefix = "Stok"
//! low_stock_warning_ms = 3000
//! out_of_stock_warning_ms = 4000
//!
//! [logging]
//! filter = "info,stockmark=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use stockmark_core::stock::{StockDisplayConfig, StockThresholds};
use stockmark_core::validation::validate_required;
use stockmark_core::{DEFAULT_LOW_STOCK_BELOW, DEFAULT_MEDIUM_STOCK_MAX};

use crate::error::{CliError, CliResult};

pub const ENV_LOW_STOCK_BELOW: &str = "STOCKMARK_LOW_STOCK_BELOW";
pub const ENV_MEDIUM_STOCK_MAX: &str = "STOCKMARK_MEDIUM_STOCK_MAX";
pub const ENV_OUT_OF_STOCK_LABEL: &str = "STOCKMARK_OUT_OF_STOCK_LABEL";
pub const ENV_IN_STOCK_PREFIX: &str = "STOCKMARK_IN_STOCK_PREFIX";
pub const ENV_LOG: &str = "STOCKMARK_LOG";

// =============================================================================
// Stock Settings
// =============================================================================

/// Stock level boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSettings {
    #[serde(default = "default_low_below")]
    pub low_below: f64,

    #[serde(default = "default_medium_max")]
    pub medium_max: f64,
}

fn default_low_below() -> f64 {
    DEFAULT_LOW_STOCK_BELOW
}

fn default_medium_max() -> f64 {
    DEFAULT_MEDIUM_STOCK_MAX
}

impl Default for StockSettings {
    fn default() -> Self {
        StockSettings {
            low_below: default_low_below(),
            medium_max: default_medium_max(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Badge texts and warning durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_out_of_stock_label")]
    pub out_of_stock_label: String,

    #[serde(default = "default_in_stock_prefix")]
    pub in_stock_prefix: String,

    /// How long the low stock notification stays up (milliseconds).
    #[serde(default = "default_low_stock_warning_ms")]
    pub low_stock_warning_ms: u32,

    /// How long the out of stock notification stays up (milliseconds).
    #[serde(default = "default_out_of_stock_warning_ms")]
    pub out_of_stock_warning_ms: u32,
}

fn default_out_of_stock_label() -> String {
    "Habis".to_string()
}

fn default_in_stock_prefix() -> String {
    "Stok".to_string()
}

fn default_low_stock_warning_ms() -> u32 {
    3000
}

fn default_out_of_stock_warning_ms() -> u32 {
    4000
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            out_of_stock_label: default_out_of_stock_label(),
            in_stock_prefix: default_in_stock_prefix(),
            low_stock_warning_ms: default_low_stock_warning_ms(),
            out_of_stock_warning_ms: default_out_of_stock_warning_ms(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,stockmark=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockmarkConfig {
    #[serde(default)]
    pub stock: StockSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl StockmarkConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (stockmark.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() || explicit {
                info!(?path, "Loading config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| CliError::io(&path, e))?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.display_config().validate()?;
        validate_required("logging.filter", &self.logging.filter)?;
        Ok(())
    }

    /// Settings in the form the core's stock rules take.
    pub fn display_config(&self) -> StockDisplayConfig {
        StockDisplayConfig {
            thresholds: StockThresholds {
                low_below: self.stock.low_below,
                medium_max: self.stock.medium_max,
            },
            out_of_stock_label: self.display.out_of_stock_label.clone(),
            in_stock_prefix: self.display.in_stock_prefix.clone(),
            low_stock_warning_ms: self.display.low_stock_warning_ms,
            out_of_stock_warning_ms: self.display.out_of_stock_warning_ms,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `var`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(value) = var(ENV_LOW_STOCK_BELOW) {
            match value.trim().parse::<f64>() {
                Ok(parsed) => {
                    debug!(
                        low_below = parsed,
                        "Overriding low stock threshold from environment"
                    );
                    self.stock.low_below = parsed;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid {}", ENV_LOW_STOCK_BELOW),
            }
        }

        if let Some(value) = var(ENV_MEDIUM_STOCK_MAX) {
            match value.trim().parse::<f64>() {
                Ok(parsed) => {
                    debug!(
                        medium_max = parsed,
                        "Overriding medium stock threshold from environment"
                    );
                    self.stock.medium_max = parsed;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid {}", ENV_MEDIUM_STOCK_MAX),
            }
        }

        if let Some(label) = var(ENV_OUT_OF_STOCK_LABEL) {
            self.display.out_of_stock_label = label;
        }

        if let Some(prefix) = var(ENV_IN_STOCK_PREFIX) {
            self.display.in_stock_prefix = prefix;
        }

        if let Some(filter) = var(ENV_LOG) {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockmark", "stockmark")
            .map(|dirs| dirs.config_dir().join("stockmark.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = StockmarkConfig::default();
        assert_eq!(config.stock.low_below, 10.0);
        assert_eq!(config.stock.medium_max, 20.0);
        assert_eq!(config.display.out_of_stock_label, "Habis");
        assert_eq!(config.logging.filter, "info,stockmark=debug");
        assert!(config.validate().is_ok());
        assert_eq!(config.display_config(), StockDisplayConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StockmarkConfig::from_toml(
            r#"
            [stock]
            low_below = 5.0

            [display]
            in_stock_prefix = "Stock"
            "#,
        )
        .unwrap();

        assert_eq!(config.stock.low_below, 5.0);
        assert_eq!(config.stock.medium_max, 20.0);
        assert_eq!(config.display.in_stock_prefix, "Stock");
        assert_eq!(config.display.out_of_stock_warning_ms, 4000);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            StockmarkConfig::from_toml("[stock]\nlow_below = \"many\""),
            Err(CliError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            (ENV_LOW_STOCK_BELOW, "3"),
            (ENV_MEDIUM_STOCK_MAX, "8.5"),
            (ENV_OUT_OF_STOCK_LABEL, "Sold out"),
            (ENV_LOG, "warn"),
        ]);
        let mut config = StockmarkConfig::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.stock.low_below, 3.0);
        assert_eq!(config.stock.medium_max, 8.5);
        assert_eq!(config.display.out_of_stock_label, "Sold out");
        assert_eq!(config.display.in_stock_prefix, "Stok");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_invalid_env_number_is_ignored() {
        let env = vars(&[(ENV_LOW_STOCK_BELOW, "lots")]);
        let mut config = StockmarkConfig::default();
        config.apply_overrides(|key| env.get(key).cloned());
        assert_eq!(config.stock.low_below, 10.0);
    }

    #[test]
    fn test_validation() {
        let mut config = StockmarkConfig::default();
        config.stock.low_below = 30.0;
        assert!(matches!(config.validate(), Err(CliError::Validation(_))));

        let mut config = StockmarkConfig::default();
        config.display.out_of_stock_label = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = StockmarkConfig::default();
        config.logging.filter = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stock]\nlow_below = 4.0\nmedium_max = 12.0").unwrap();

        let config = StockmarkConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.stock.low_below, 4.0);
        assert_eq!(config.stock.medium_max, 12.0);
    }

    #[test]
    fn test_load_invalid_thresholds_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stock]\nlow_below = 40.0").unwrap();

        assert!(StockmarkConfig::load(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            StockmarkConfig::load(Some(missing)),
            Err(CliError::Io { .. })
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&StockmarkConfig::default()).unwrap();
        assert!(toml_str.contains("[stock]"));
        assert!(toml_str.contains("[display]"));
        assert!(toml_str.contains("[logging]"));
    }
}
