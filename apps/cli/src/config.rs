//! # Application Configuration
//!
//! Settings loaded once at startup, read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main)             │
//! │     --export clientes.csv / --no-export                                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     DROGARIA_STORE_NAME=Drogaria Central                               │
//! │     DROGARIA_DUPLICATES=allow                                          │
//! │     DROGARIA_EXPORT_PATH=/tmp/clientes.csv                             │
//! │     DROGARIA_EXPORT_ENABLED=false                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or drogaria.toml in the platform config dir       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Drogaria PUC"
//! currency_symbol = "R$"
//!
//! [registry]
//! duplicates = "reject"   # reject | allow
//!
//! [discounts]
//! senior_age_threshold = 65
//! senior_rate_bps = 2000
//! bulk_threshold = 15000  # cents
//! bulk_rate_bps = 1000
//!
//! [export]
//! enabled = true
//! path = "clientes.csv"
//! ```

use std::path::{Path, PathBuf};

use drogaria_core::{DiscountPolicy, Money};
use drogaria_store::{DuplicatePolicy, PharmacyConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "drogaria.toml";

// =============================================================================
// Sections
// =============================================================================

/// `[store]`: shop identity and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Shown in the shell banner.
    pub name: String,

    /// Prefix for money amounts.
    pub currency_symbol: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Drogaria".to_string(),
            currency_symbol: "R$".to_string(),
        }
    }
}

/// `[registry]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub duplicates: DuplicatePolicy,
}

/// `[export]`: customer CSV written when the session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            enabled: true,
            path: PathBuf::from("clientes.csv"),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub registry: RegistrySettings,

    #[serde(default)]
    pub discounts: DiscountPolicy,

    #[serde(default)]
    pub export: ExportSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`path`, else the platform default if it exists)
    /// 3. Environment variables
    ///
    /// An explicit `path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                other => {
                    debug!(path = ?other, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Checks values the types cannot rule out.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        for (field, bps) in [
            ("discounts.senior_rate_bps", self.discounts.senior_rate_bps),
            ("discounts.bulk_rate_bps", self.discounts.bulk_rate_bps),
        ] {
            if bps > 10_000 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be between 0 and 10000, got {}",
                    field, bps
                )));
            }
        }

        if self.discounts.bulk_threshold.is_negative() {
            return Err(ConfigError::Invalid(
                "discounts.bulk_threshold must not be negative".into(),
            ));
        }

        if self.export.enabled && self.export.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "export.path must be set when export is enabled".into(),
            ));
        }

        Ok(())
    }

    /// Applies `DROGARIA_*` overrides read through `var`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("DROGARIA_STORE_NAME") {
            debug!(name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(policy) = var("DROGARIA_DUPLICATES") {
            match policy.parse() {
                Ok(parsed) => self.registry.duplicates = parsed,
                Err(e) => warn!(value = %policy, "Ignoring DROGARIA_DUPLICATES: {}", e),
            }
        }

        if let Some(path) = var("DROGARIA_EXPORT_PATH") {
            debug!(path = %path, "Overriding export path from environment");
            self.export.path = PathBuf::from(path);
        }

        if let Some(enabled) = var("DROGARIA_EXPORT_ENABLED") {
            match parse_bool(&enabled) {
                Some(flag) => self.export.enabled = flag,
                None => warn!(value = %enabled, "Ignoring DROGARIA_EXPORT_ENABLED"),
            }
        }
    }

    /// `drogaria.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("br", "drogaria", "drogaria")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Settings handed to the store.
    pub fn pharmacy_config(&self) -> PharmacyConfig {
        PharmacyConfig::new()
            .duplicate_policy(self.registry.duplicates)
            .discount_policy(self.discounts)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use drogaria_cli::config::AppConfig;
    /// use drogaria_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "R$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.store.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
