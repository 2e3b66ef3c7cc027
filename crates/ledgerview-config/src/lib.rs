//! Configuration management for ledgerview
//!
//! This module handles loading, validation, and management of
//! ledgerview configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigErrorCode, ConfigErrorDetails, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Transaction list view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Title rendered when no account is open
    #[serde(default = "default_placeholder_title")]
    pub placeholder_title: String,
    /// Marker class carried by the "remove account" control
    #[serde(default = "default_remove_account_class")]
    pub remove_account_class: String,
    /// Marker class carried by each "remove transaction" button
    #[serde(default = "default_remove_transaction_class")]
    pub remove_transaction_class: String,
    /// Attribute holding the transaction identifier
    #[serde(default = "default_id_attribute")]
    pub id_attribute: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            placeholder_title: default_placeholder_title(),
            remove_account_class: default_remove_account_class(),
            remove_transaction_class: default_remove_transaction_class(),
            id_attribute: default_id_attribute(),
        }
    }
}

fn default_placeholder_title() -> String {
    "Account name".to_string()
}

fn default_remove_account_class() -> String {
    "remove-account".to_string()
}

fn default_remove_transaction_class() -> String {
    "transaction__remove".to_string()
}

fn default_id_attribute() -> String {
    "data-id".to_string()
}

/// Locale settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocaleConfig {
    /// Language used for dates
    #[serde(default)]
    pub language: Language,
}

/// Supported date languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English: "10 March 2019 at 03:20"
    #[default]
    En,
    /// Russian: "10 марта 2019 г. в 03:20"
    Ru,
}

impl std::str::FromStr for Language {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ru" | "russian" => Ok(Language::Ru),
            _ => Err(format!("Invalid language: {}", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ru => write!(f, "ru"),
        }
    }
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Suffix rendered after every sum
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₽".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    " ".to_string()
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

/// Confirmation prompt texts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_remove_account_prompt")]
    pub remove_account: String,
    #[serde(default = "default_remove_transaction_prompt")]
    pub remove_transaction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            remove_account: default_remove_account_prompt(),
            remove_transaction: default_remove_transaction_prompt(),
        }
    }
}

fn default_remove_account_prompt() -> String {
    "Do you really want to delete this account?".to_string()
}

fn default_remove_transaction_prompt() -> String {
    "Do you really want to delete this transaction?".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// View settings
    #[serde(default)]
    pub view: ViewConfig,
    /// Locale settings
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Confirmation prompts
    #[serde(default)]
    pub prompts: PromptConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            reason: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.view.placeholder_title.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "view.placeholder_title".to_string(),
            });
        }

        for (field, value) in [
            ("view.remove_account_class", &self.view.remove_account_class),
            ("view.remove_transaction_class", &self.view.remove_transaction_class),
            ("view.id_attribute", &self.view.id_attribute),
        ] {
            if value.trim().is_empty() || value.contains(char::is_whitespace) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "Must be a single non-empty token".to_string(),
                });
            }
        }

        if self.view.remove_account_class == self.view.remove_transaction_class {
            return Err(ConfigError::Conflict {
                message: "account and transaction marker classes must differ".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================
