//! Line items and cart categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Amount;

/// Product category a ledger holds. Each category is persisted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Workwear, the main catalogue.
    Primary,
    /// Sportswear.
    Secondary,
}

impl Category {
    /// Both categories, in display order.
    pub const ALL: [Category; 2] = [Category::Primary, Category::Secondary];

    /// Name used in `data-category` attributes and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Primary => "primary",
            Category::Secondary => "secondary",
        }
    }

    /// Storage key the category is persisted under unless configured otherwise.
    pub fn default_storage_key(&self) -> &'static str {
        match self {
            Category::Primary => "proWorkCart",
            Category::Secondary => "sportswearCart",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Category::Primary),
            "secondary" => Ok(Category::Secondary),
            _ => Err(CommerceError::UnknownCategory(s.to_string())),
        }
    }
}

/// One product entry in a ledger.
///
/// Serialized as `{id, name, price, image, quantity}`, the shape the
/// storefront has always written to local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier.
    pub id: ItemId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    #[serde(rename = "price")]
    pub unit_price: Amount,
    /// Image URL or path.
    #[serde(rename = "image", default)]
    pub image_ref: String,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity 1.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit_price: Amount,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
            quantity: 1,
        }
    }

    /// Total price (unit_price * quantity).
    pub fn total(&self) -> Amount {
        self.unit_price.times(self.quantity)
    }

    /// Check the invariants a persisted entry must satisfy to be loaded.
    pub fn is_well_formed(&self) -> bool {
        self.quantity >= 1 && self.unit_price.is_valid_price()
    }
}
