//! CLI configuration.

use anyhow::{anyhow, bail, Context, Result};
use cart_core::cart::{PricingOptions, DEFAULT_CART_KEY, DEFAULT_TAX_RATE};
use cart_core::{Currency, Money};
use cart_storage::validate_key;
use serde::{Deserialize, Serialize};

/// File names searched for when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where and under which key the cart is persisted.
    #[serde(default)]
    pub store: StoreConfig,

    /// Order summary settings.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the store cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.store.key.trim().is_empty() {
            bail!("store.key must not be empty");
        }
        validate_key(&self.store.key).with_context(|| {
            format!(
                "store.key {:?} may only contain letters, digits, '_', '-', '.' or ':'",
                self.store.key
            )
        })?;
        self.pricing.currency()?;
        if !(0.0..=1.0).contains(&self.pricing.tax_rate) {
            bail!(
                "pricing.tax_rate must be between 0 and 1, got {}",
                self.pricing.tax_rate
            );
        }
        if !self.pricing.shipping.is_finite() || self.pricing.shipping < 0.0 {
            bail!(
                "pricing.shipping must be a non-negative amount, got {}",
                self.pricing.shipping
            );
        }
        Ok(())
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the cart file. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Storage key of the cart snapshot.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_key(),
        }
    }
}

/// Pricing settings for the order summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO currency code for prices and totals.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tax rate as a fraction.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Flat shipping charge; zero means free shipping.
    #[serde(default)]
    pub shipping: f64,
}

fn default_currency() -> String {
    Currency::USD.code().to_string()
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            tax_rate: default_tax_rate(),
            shipping: 0.0,
        }
    }
}

impl PricingConfig {
    /// Parsed currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unsupported currency: {}", self.currency))
    }

    /// Options for [`cart_core::cart::CartSummary`].
    pub fn options(&self) -> Result<PricingOptions> {
        let currency = self.currency()?;
        let shipping = Money::from_decimal(self.shipping, currency);
        Ok(PricingOptions {
            tax_rate: self.tax_rate,
            shipping: (!shipping.is_zero()).then_some(shipping),
        })
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Cart configuration

[store]
# data_dir = "~/.local/share/cart"
key = "{key}"

[pricing]
currency = "USD"
tax_rate = {tax}
shipping = 0.0
"#,
        key = DEFAULT_CART_KEY,
        tax = DEFAULT_TAX_RATE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.store.key, "cart");
        assert!(config.store.data_dir.is_none());
        assert_eq!(config.pricing.currency().unwrap(), Currency::USD);
        assert!((config.pricing.tax_rate - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.key, "cart");
        assert_eq!(config.pricing.currency, "USD");
    }

    #[test]
    fn test_options_free_shipping_is_none() {
        let options = PricingConfig::default().options().unwrap();
        assert!(options.shipping.is_none());

        let paid = PricingConfig {
            shipping: 4.99,
            ..PricingConfig::default()
        };
        assert_eq!(paid.options().unwrap().shipping.unwrap().amount_cents, 499);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.pricing.currency = "XYZ".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.pricing.tax_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.store.key = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.store.key = "my cart".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.store.key = "../cart".to_string();
        assert!(config.validate().is_err());
    }
}
