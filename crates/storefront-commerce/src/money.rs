//! Monetary amounts.
//!
//! The storefront prices in dollars with full floating precision and only
//! rounds to cents when a value is shown. `Amount` keeps that contract in
//! one place: arithmetic on the raw value, rounding in [`Amount::display`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use crate::error::CommerceError;

/// Currency symbol used when displaying amounts.
pub const CURRENCY_SYMBOL: &str = "$";

/// A monetary value in currency units (dollars).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(0.0);

    /// Wrap a raw value. No validation.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create a unit price, rejecting negative and non-finite values.
    pub fn price(value: f64) -> Result<Self, CommerceError> {
        let amount = Self(value);
        if amount.is_valid_price() {
            Ok(amount)
        } else {
            Err(CommerceError::InvalidPrice(value.to_string()))
        }
    }

    /// Parse a price from text, e.g. a `data-product-price` attribute.
    ///
    /// Accepts an optional leading `$` and surrounding whitespace. Anything
    /// that is not a complete number is rejected rather than coerced.
    ///
    /// ```
    /// use storefront_commerce::money::Amount;
    /// assert_eq!(Amount::parse(" $49.99 ").unwrap(), Amount::new(49.99));
    /// assert!(Amount::parse("49.99abc").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, CommerceError> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed).trim();
        let value: f64 = digits
            .parse()
            .map_err(|_| CommerceError::InvalidPrice(text.to_string()))?;
        Self::price(value).map_err(|_| CommerceError::InvalidPrice(text.to_string()))
    }

    /// Raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Check if this is usable as a unit price.
    pub fn is_valid_price(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Value rounded to cents.
    pub fn rounded(&self) -> f64 {
        // Adding 0.0 turns -0.0 into 0.0.
        (self.0 * 100.0).round() / 100.0 + 0.0
    }

    /// Multiply by a quantity.
    pub fn times(&self, quantity: u32) -> Amount {
        Amount(self.0 * f64::from(quantity))
    }

    /// Multiply by a rate or fraction (tax rate, discount fraction).
    pub fn scale(&self, factor: f64) -> Amount {
        Amount(self.0 * factor)
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.rounded())
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_symbol() {
        assert_eq!(Amount::parse("24.5").unwrap().value(), 24.5);
        assert_eq!(Amount::parse("$0").unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Amount::parse("abc"),
            Err(CommerceError::InvalidPrice(_))
        ));
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("12.5kg").is_err());
        assert!(Amount::parse("-3").is_err());
        assert!(Amount::parse("NaN").is_err());
        assert!(Amount::parse("inf").is_err());
    }

    #[test]
    fn test_price_validation() {
        assert!(Amount::price(0.0).is_ok());
        assert!(Amount::price(-0.01).is_err());
        assert!(Amount::price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_display_rounds_only_at_the_end() {
        let third = Amount::new(10.0).scale(1.0 / 3.0);
        assert_eq!(third.display(), "$3.33");
        // Internal precision is preserved.
        assert!((third.times(3).value() - 10.0).abs() < 1e-9);
        assert_eq!(third.times(3).display(), "$10.00");
    }

    #[test]
    fn test_negative_zero_displays_as_zero() {
        let z = Amount::new(1.0) - Amount::new(1.0) - Amount::ZERO.scale(-1.0);
        assert_eq!(z.display(), "$0.00");
        assert_eq!(Amount::new(-0.0).display_amount(), "0.00");
    }

    #[test]
    fn test_sum() {
        let total: Amount = [1.25, 2.5, 0.25].into_iter().map(Amount::new).sum();
        assert_eq!(total, Amount::new(4.0));
    }
}
