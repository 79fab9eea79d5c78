//! CLI configuration.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fishmarket_cache::cache_key;
use fishmarket_commerce::cart::DEFAULT_CART_KEY;
use fishmarket_commerce::Currency;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["fishmarket.toml", ".fishmarket.toml", "fishmarket.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront settings.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Cart storage settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Order submission settings.
    #[serde(default)]
    pub orders: OrdersConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// The shop currency.
    pub fn currency(&self) -> Result<Currency> {
        match Currency::from_code(&self.shop.currency) {
            Some(currency) => Ok(currency),
            None => bail!("Unknown currency code: {}", self.shop.currency),
        }
    }

    /// Storage key the cart lives under, namespaced by profile.
    pub fn cart_key(&self) -> String {
        match &self.store.profile {
            Some(profile) => cache_key!(self.store.key.as_str(), profile),
            None => self.store.key.clone(),
        }
    }

    /// Collect configuration problems.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if Currency::from_code(&self.shop.currency).is_none() {
            errors.push(format!("shop.currency '{}' is not supported", self.shop.currency));
        }
        if self.store.key.trim().is_empty() {
            errors.push("store.key must not be empty".to_string());
        }
        if let Some(profile) = &self.store.profile {
            if profile.trim().is_empty() {
                errors.push("store.profile must not be empty when set".to_string());
            }
        }
        if self.store.backend == StoreBackend::File && self.store.path.trim().is_empty() {
            errors.push("store.path is required for the file backend".to_string());
        }
        if self.orders.outbox.trim().is_empty() {
            errors.push("orders.outbox must not be empty".to_string());
        }

        errors
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Storefront settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// ISO currency code every price is in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Where the cart is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One file per key under `store.path`.
    #[default]
    File,
    /// Process memory; nothing survives the command.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Cart storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage backend.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory for the file backend.
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Base storage key.
    #[serde(default = "default_store_key")]
    pub key: String,

    /// Optional profile appended to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

fn default_store_path() -> String {
    ".fishmarket/store".to_string()
}

fn default_store_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            key: default_store_key(),
            profile: None,
        }
    }
}

/// Order submission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Directory submitted orders are written to.
    #[serde(default = "default_outbox")]
    pub outbox: String,
}

fn default_outbox() -> String {
    ".fishmarket/orders".to_string()
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            outbox: default_outbox(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// JSON lines for log aggregation.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default fishmarket.toml config file.
pub fn generate_default_config() -> String {
    r#"# fishmarket storefront configuration

[shop]
currency = "USD"

[store]
backend = "file"
path = ".fishmarket/store"
key = "cart"
# profile = "guest"

[orders]
outbox = ".fishmarket/orders"

[logging]
level = "info"
format = "compact"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.shop.currency, "USD");
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.cart_key(), "cart");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.orders.outbox, ".fishmarket/orders");
        assert_eq!(config.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_profile_namespaces_key() {
        let config: CliConfig = toml::from_str(
            r#"
            [shop]
            currency = "nok"

            [store]
            backend = "memory"
            profile = "guest"
            "#,
        )
        .unwrap();
        assert_eq!(config.cart_key(), "cart:guest");
        assert_eq!(config.currency().unwrap(), Currency::NOK);
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = CliConfig::default();
        config.shop.currency = "XXX".to_string();
        config.store.key = " ".to_string();

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fishmarket.json");
        std::fs::write(&path, r#"{"store": {"profile": "kiosk"}}"#).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.cart_key(), "cart:kiosk");
        assert_eq!(loaded.shop.currency, "USD");
    }
}
