use std::{env, path::PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable that overrides the cashbook home directory.
pub const HOME_ENV: &str = "CASHBOOK_HOME";

/// Stores user-configurable reporting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u8,
    /// Bank books whose closing balances appear on the balance sheet.
    #[serde(default = "Config::default_bank_books")]
    pub bank_books: Vec<String>,
    /// Business units summarized by `units`; empty means every tagged unit.
    #[serde(default)]
    pub business_units: Vec<String>,
    #[serde(default = "Config::default_reconciliation_tolerance")]
    pub reconciliation_tolerance: Decimal,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_snapshot: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            currency_precision: Self::default_currency_precision(),
            bank_books: Self::default_bank_books(),
            business_units: Vec::new(),
            reconciliation_tolerance: Self::default_reconciliation_tolerance(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_snapshot: None,
            last_opened_snapshot: None,
        }
    }
}

impl Config {
    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn default_bank_books() -> Vec<String> {
        vec!["CUB".into(), "KVB".into()]
    }

    pub fn default_reconciliation_tolerance() -> Decimal {
        Decimal::ONE
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Snapshot opened at startup: the explicit default, else the last one
    /// opened.
    pub fn startup_snapshot(&self) -> Option<&PathBuf> {
        self.default_snapshot
            .as_ref()
            .or(self.last_opened_snapshot.as_ref())
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "locale" => self.locale = value.to_string(),
            "currency" => {
                if value.is_empty() {
                    return Err(invalid("currency code cannot be empty"));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "currency_precision" => {
                let precision: u8 = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number"))?;
                if precision > 6 {
                    return Err(invalid("precision must be between 0 and 6"));
                }
                self.currency_precision = precision;
            }
            "bank_books" => self.bank_books = split_list(value, true),
            "business_units" => self.business_units = split_list(value, false),
            "reconciliation_tolerance" => {
                let tolerance: Decimal = value
                    .parse()
                    .map_err(|_| invalid("expected a decimal amount"))?;
                if tolerance.is_sign_negative() {
                    return Err(invalid("tolerance cannot be negative"));
                }
                self.reconciliation_tolerance = tolerance;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid("expected on or off")),
                }
            }
            "default_snapshot" => {
                self.default_snapshot = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            _ => return Err(invalid("unknown setting")),
        }
        Ok(())
    }
}

/// Base directory for configuration and snapshots. `CASHBOOK_HOME` wins,
/// then the platform data directory, then the home directory.
pub fn resolve_home() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(custom);
    }
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cashbook")
}

fn split_list(value: &str, upper: bool) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            if upper {
                item.to_ascii_uppercase()
            } else {
                item.to_string()
            }
        })
        .collect()
}
