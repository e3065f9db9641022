//! Checkout hand-off.
//!
//! There is no payment processing here. A checkout request is a snapshot of
//! the combined cart and its totals, handed to whatever comes next.

use serde::{Deserialize, Serialize};

use crate::cart::{CartSummary, Category, CombinedView, LineItem, Promotion};

/// One line of the snapshot, tagged with its ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutLine {
    /// Ledger the line came from.
    pub category: Category,
    /// The line item as it was at checkout.
    #[serde(flatten)]
    pub item: LineItem,
}

/// Snapshot of the cart at the moment the shopper pressed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Lines in display order.
    pub lines: Vec<CheckoutLine>,
    /// Totals.
    pub summary: CartSummary,
    /// Code of the active promotion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
}

impl CheckoutRequest {
    /// Build a snapshot from the combined view.
    pub fn snapshot(
        view: &CombinedView<'_>,
        summary: CartSummary,
        promotion: Option<&Promotion>,
    ) -> Self {
        Self {
            lines: view
                .iter()
                .map(|entry| CheckoutLine {
                    category: entry.category,
                    item: entry.item.clone(),
                })
                .collect(),
            summary,
            promotion_code: promotion.map(|p| p.code().to_string()),
        }
    }

    /// Total units in the snapshot.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.item.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PricingPolicy;
    use crate::ids::ItemId;
    use crate::money::Amount;

    #[test]
    fn test_snapshot_keeps_order_and_categories() {
        let primary = vec![LineItem::new(ItemId::new("x"), "Vest", Amount::new(30.0), "")];
        let secondary = vec![LineItem {
            quantity: 2,
            ..LineItem::new(ItemId::new("x"), "Shorts", Amount::new(15.0), "")
        }];
        let view = CombinedView::new(&primary, &secondary);
        let promotion = Promotion::FreeShipping {
            code: "FREESHIP".to_string(),
        };
        let summary = CartSummary::compute(&view, Some(&promotion), &PricingPolicy::default());

        let request = CheckoutRequest::snapshot(&view, summary, Some(&promotion));
        assert_eq!(request.lines.len(), 2);
        assert_eq!(request.lines[0].category, Category::Primary);
        assert_eq!(request.lines[1].item.name, "Shorts");
        assert_eq!(request.units(), 3);
        assert_eq!(request.promotion_code.as_deref(), Some("FREESHIP"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["lines"][1]["category"], "secondary");
        assert_eq!(json["lines"][1]["price"], 15.0);
    }
}
