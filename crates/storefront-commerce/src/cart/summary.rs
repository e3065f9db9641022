//! Order summary calculations.

use serde::{Deserialize, Serialize};

use crate::cart::{CombinedView, Promotion};
use crate::money::Amount;

/// Shipping and tax parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Amount,
    /// Shipping charged at or below the threshold.
    pub flat_shipping_fee: Amount,
    /// Tax rate applied to the undiscounted subtotal.
    pub tax_rate: f64,
    /// Whether an empty cart still shows the flat fee.
    pub charge_shipping_on_empty_cart: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Amount::new(200.0),
            flat_shipping_fee: Amount::new(9.99),
            tax_rate: 0.08,
            charge_shipping_on_empty_cart: true,
        }
    }
}

/// Totals shown next to the cart. Values keep full precision; round with
/// [`Amount::display`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Units across both ledgers.
    pub item_count: u64,
    /// Sum of `unit_price * quantity`.
    pub subtotal: Amount,
    /// Shipping charge.
    pub shipping: Amount,
    /// Tax on the subtotal (before discount).
    pub tax: Amount,
    /// Promotion discount.
    pub discount: Amount,
    /// `subtotal + shipping + tax - discount`.
    pub total: Amount,
}

impl CartSummary {
    /// Compute the summary for the combined cart and the active promotion.
    pub fn compute(
        view: &CombinedView<'_>,
        promotion: Option<&Promotion>,
        policy: &PricingPolicy,
    ) -> Self {
        let subtotal = view.subtotal();

        let shipping = if promotion.is_some_and(Promotion::waives_shipping)
            || subtotal > policy.free_shipping_threshold
            || (view.is_empty() && !policy.charge_shipping_on_empty_cart)
        {
            Amount::ZERO
        } else {
            policy.flat_shipping_fee
        };

        let tax = subtotal.scale(policy.tax_rate);

        let discount = promotion
            .map(|p| subtotal.scale(p.discount_fraction()))
            .unwrap_or(Amount::ZERO);

        Self {
            item_count: view.total_units(),
            subtotal,
            shipping,
            tax,
            discount,
            total: subtotal + shipping + tax - discount,
        }
    }

    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.value() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::ids::ItemId;

    fn items(price: f64, quantity: u32) -> Vec<LineItem> {
        vec![LineItem {
            quantity,
            ..LineItem::new(ItemId::new("p"), "P", Amount::new(price), "")
        }]
    }

    fn percent(fraction: f64) -> Promotion {
        Promotion::PercentDiscount {
            code: "SAVE10".to_string(),
            fraction,
        }
    }

    fn free_shipping() -> Promotion {
        Promotion::FreeShipping {
            code: "FREESHIP".to_string(),
        }
    }

    #[test]
    fn test_percent_discount_on_100() {
        let primary = items(50.0, 2);
        let view = CombinedView::new(&primary, &[]);
        let summary = CartSummary::compute(&view, Some(&percent(0.10)), &PricingPolicy::default());

        assert_eq!(summary.subtotal.display(), "$100.00");
        assert_eq!(summary.discount.display(), "$10.00");
        assert_eq!(summary.tax.display(), "$8.00");
        assert_eq!(summary.shipping.display(), "$9.99");
        assert_eq!(summary.total.display(), "$107.99");
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_free_shipping_below_threshold() {
        let primary = items(50.0, 1);
        let view = CombinedView::new(&primary, &[]);
        let summary =
            CartSummary::compute(&view, Some(&free_shipping()), &PricingPolicy::default());

        assert_eq!(summary.shipping.display(), "$0.00");
        assert_eq!(summary.discount, Amount::ZERO);
        assert_eq!(summary.total.display(), "$54.00");
    }

    #[test]
    fn test_threshold_is_strict() {
        let policy = PricingPolicy::default();

        let at = items(200.0, 1);
        let summary = CartSummary::compute(&CombinedView::new(&at, &[]), None, &policy);
        assert_eq!(summary.shipping, policy.flat_shipping_fee);

        let above = items(200.01, 1);
        let summary = CartSummary::compute(&CombinedView::new(&above, &[]), None, &policy);
        assert!(summary.has_free_shipping());
    }

    #[test]
    fn test_tax_ignores_discount() {
        let primary = items(300.0, 1);
        let view = CombinedView::new(&primary, &[]);
        let summary = CartSummary::compute(&view, Some(&percent(0.5)), &PricingPolicy::default());

        assert_eq!(summary.tax.display(), "$24.00");
        assert_eq!(summary.discount.display(), "$150.00");
        assert_eq!(summary.total.display(), "$174.00");
    }

    #[test]
    fn test_empty_cart_charges_flat_fee_by_default() {
        let view = CombinedView::new(&[], &[]);
        let summary = CartSummary::compute(&view, None, &PricingPolicy::default());

        assert_eq!(summary.subtotal, Amount::ZERO);
        assert_eq!(summary.tax, Amount::ZERO);
        assert_eq!(summary.shipping.display(), "$9.99");
        assert_eq!(summary.total.display(), "$9.99");
    }

    #[test]
    fn test_empty_cart_fee_can_be_waived() {
        let policy = PricingPolicy {
            charge_shipping_on_empty_cart: false,
            ..PricingPolicy::default()
        };
        let view = CombinedView::new(&[], &[]);
        let summary = CartSummary::compute(&view, None, &policy);
        assert_eq!(summary.total, Amount::ZERO);
    }

    #[test]
    fn test_both_ledgers_contribute() {
        let primary = items(100.0, 1);
        let secondary = items(150.0, 1);
        let view = CombinedView::new(&primary, &secondary);
        let summary = CartSummary::compute(&view, None, &PricingPolicy::default());

        assert_eq!(summary.subtotal.display(), "$250.00");
        assert!(summary.has_free_shipping());
        assert_eq!(summary.total.display(), "$270.00");
        assert!(!summary.has_discount());
    }
}
