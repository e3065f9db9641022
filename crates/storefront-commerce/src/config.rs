//! Cart configuration.
//!
//! Every field has a default reproducing the storefront's built-in
//! constants, so an empty file (or no file at all) behaves like the
//! stock storefront pages.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cart::{standard_rules, Category, PricingPolicy, PromotionRegistry, PromotionRule};
use crate::error::CommerceError;

/// Top-level cart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Persistence keys.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shipping and tax.
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Quantity rules.
    #[serde(default)]
    pub quantity: QuantityConfig,

    /// Known promotion codes.
    #[serde(default = "standard_rules")]
    pub promotions: Vec<PromotionRule>,

    /// Notice timings.
    #[serde(default)]
    pub notices: NoticeConfig,

    /// Hero slideshow timings.
    #[serde(default)]
    pub hero: HeroConfig,

    /// Add-to-cart button feedback.
    #[serde(default)]
    pub add_to_cart: AddToCartConfig,

    /// Share modal timings.
    #[serde(default)]
    pub share: ShareConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            pricing: PricingPolicy::default(),
            quantity: QuantityConfig::default(),
            promotions: standard_rules(),
            notices: NoticeConfig::default(),
            hero: HeroConfig::default(),
            add_to_cart: AddToCartConfig::default(),
            share: ShareConfig::default(),
        }
    }
}

impl CartConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: CartConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                CommerceError::ConfigError(format!(
                    "Failed to parse JSON config {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            toml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let config: CartConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let primary = self.storage.primary_key.trim();
        let secondary = self.storage.secondary_key.trim();
        if primary.is_empty() || secondary.is_empty() {
            return Err(invalid("storage keys must not be blank"));
        }
        if primary == secondary {
            return Err(invalid("primary and secondary storage keys must differ"));
        }

        let pricing = &self.pricing;
        if !pricing.flat_shipping_fee.is_valid_price() {
            return Err(invalid("flat_shipping_fee must be a non-negative number"));
        }
        if !pricing.free_shipping_threshold.is_valid_price() {
            return Err(invalid("free_shipping_threshold must be a non-negative number"));
        }
        if !(0.0..=1.0).contains(&pricing.tax_rate) {
            return Err(invalid("tax_rate must be within [0, 1]"));
        }

        if self.hero.slide_count == 0 {
            return Err(invalid("hero.slide_count must be positive"));
        }
        if self.hero.interval_ms == 0 {
            return Err(invalid("hero.interval_ms must be positive"));
        }

        PromotionRegistry::new(self.promotions.clone())?;
        Ok(())
    }

    /// Build the promotion registry from the configured codes.
    pub fn promotion_registry(&self) -> Result<PromotionRegistry, CommerceError> {
        PromotionRegistry::new(self.promotions.clone())
    }

    /// Storage key for a category.
    pub fn storage_key(&self, category: Category) -> &str {
        match category {
            Category::Primary => &self.storage.primary_key,
            Category::Secondary => &self.storage.secondary_key,
        }
    }
}

fn invalid(message: &str) -> CommerceError {
    CommerceError::ValidationError(message.to_string())
}

/// Persistence keys, one per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key for the primary (workwear) ledger.
    pub primary_key: String,
    /// Key for the secondary (sportswear) ledger.
    pub secondary_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            primary_key: Category::Primary.default_storage_key().to_string(),
            secondary_key: Category::Secondary.default_storage_key().to_string(),
        }
    }
}

/// What to do when a quantity below 1 is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BelowMinimumPolicy {
    /// Leave the line untouched. The minus control clamps at 1.
    #[default]
    Ignore,
    /// Remove the line.
    Remove,
}

/// Quantity rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantityConfig {
    /// Handling of requests below 1.
    pub below_minimum: BelowMinimumPolicy,
}

/// Notice timings in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Time before a notice dismisses itself.
    pub auto_dismiss_ms: u64,
    /// Fade-out before the notice element is removed.
    pub fade_ms: u64,
    /// Delay before the notice that follows "Proceeding to checkout...".
    pub checkout_follow_up_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 4000,
            fade_ms: 300,
            checkout_follow_up_ms: 1000,
        }
    }
}

/// Hero slideshow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Time between slide changes.
    pub interval_ms: u64,
    /// Delay before the first change after page load.
    pub initial_delay_ms: u64,
    /// Number of background slides.
    pub slide_count: usize,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            initial_delay_ms: 100,
            slide_count: 3,
        }
    }
}

/// Add-to-cart button feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddToCartConfig {
    /// How long the "Added (n)" label stays before reverting.
    pub reset_ms: u64,
}

impl Default for AddToCartConfig {
    fn default() -> Self {
        Self { reset_ms: 2000 }
    }
}

/// Share modal timings in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Delay between opening a share target and closing the modal.
    pub close_after_share_ms: u64,
    /// How long the copy button reads "Copied!".
    pub copied_reset_ms: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            close_after_share_ms: 1000,
            copied_reset_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PromotionEffect;
    use crate::money::Amount;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = CartConfig::from_toml_str("").unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key(Category::Primary), "proWorkCart");
        assert_eq!(config.storage_key(Category::Secondary), "sportswearCart");
        assert_eq!(config.pricing.flat_shipping_fee, Amount::new(9.99));
        assert_eq!(config.promotions.len(), 2);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = CartConfig::from_toml_str(
            r#"
            [pricing]
            tax_rate = 0.2
            free_shipping_threshold = 150

            [quantity]
            below_minimum = "remove"

            [[promotions]]
            code = "WELCOME"
            kind = "percent"
            fraction = 0.15
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.tax_rate, 0.2);
        assert_eq!(config.pricing.free_shipping_threshold, Amount::new(150.0));
        assert_eq!(config.pricing.flat_shipping_fee, Amount::new(9.99));
        assert_eq!(config.quantity.below_minimum, BelowMinimumPolicy::Remove);
        assert_eq!(config.promotions.len(), 1);
        assert_eq!(
            config.promotions[0].effect,
            PromotionEffect::Percent { fraction: 0.15 }
        );
    }

    #[test]
    fn test_validation_failures() {
        assert!(CartConfig::from_toml_str(
            "[storage]\nprimary_key = \"cart\"\nsecondary_key = \"cart\""
        )
        .is_err());
        assert!(CartConfig::from_toml_str("[pricing]\ntax_rate = 1.5").is_err());
        assert!(CartConfig::from_toml_str("[hero]\nslide_count = 0").is_err());
        assert!(CartConfig::from_toml_str(
            "[[promotions]]\ncode = \"X\"\nkind = \"free_shipping\"\n[[promotions]]\ncode = \"x\"\nkind = \"free_shipping\""
        )
        .is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("cart.toml");
        std::fs::write(&toml_path, "[notices]\nauto_dismiss_ms = 1000\n").unwrap();
        let config = CartConfig::load(&toml_path).unwrap();
        assert_eq!(config.notices.auto_dismiss_ms, 1000);
        assert_eq!(config.notices.fade_ms, 300);
        assert_eq!(config.notices.checkout_follow_up_ms, 1000);
        assert_eq!(config.share, ShareConfig::default());

        let json_path = dir.path().join("cart.json");
        std::fs::write(&json_path, r#"{"hero": {"slide_count": 5}}"#).unwrap();
        let config = CartConfig::load(&json_path).unwrap();
        assert_eq!(config.hero.slide_count, 5);
        assert_eq!(config.hero.interval_ms, 5000);

        let missing = CartConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(CommerceError::ConfigError(_))));
    }
}
