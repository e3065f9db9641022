//! Cart markup.

use storefront_commerce::cart::{CartSummary, CombinedEntry, CombinedView};

/// Render the combined cart into the items container.
pub fn render_cart_items(view: &CombinedView<'_>) -> String {
    if view.is_empty() {
        return render_empty_cart();
    }

    let items: String = view.iter().map(render_cart_item).collect();
    format!(
        r#"<div class="cart-header">
    <h2>Your Items ({units})</h2>
    <span>Price</span>
</div>
{items}"#,
        units = view.total_units(),
        items = items
    )
}

/// Placeholder shown when both ledgers are empty.
pub fn render_empty_cart() -> String {
    r#"<div class="empty-cart">
    <i class="fas fa-shopping-cart"></i>
    <h3>Your cart is empty</h3>
    <p>Add some items to your cart to get started</p>
    <a href="shop.html" class="continue-shopping">Continue Shopping</a>
</div>"#
        .to_string()
}

/// Render one cart row. Every control carries both the item id and its
/// category, since ids may repeat across ledgers.
pub fn render_cart_item(entry: &CombinedEntry<'_>) -> String {
    let item = entry.item;
    let id = html_escape(item.id.as_str());
    let category = entry.category.as_str();
    let name = html_escape(&item.name);
    let keys = format!(r#"data-product-id="{}" data-category="{}""#, id, category);

    format!(
        r#"<div class="cart-item" {keys}>
    <div class="cart-item-image">
        <img src="{image}" alt="{name}">
    </div>
    <div class="cart-item-details">
        <div class="cart-item-info">
            <h3>{name}</h3>
            <p>Size: One Size | Color: Standard</p>
            <div class="cart-item-price">{price}</div>
        </div>
        <div class="cart-item-controls">
            <div class="quantity-controls">
                <button class="quantity-btn minus-btn" {keys}>-</button>
                <input type="text" class="quantity-input" value="{quantity}" readonly {keys}>
                <button class="quantity-btn plus-btn" {keys}>+</button>
            </div>
            <button class="remove-item" {keys}>Remove</button>
        </div>
    </div>
</div>
"#,
        keys = keys,
        image = html_escape(&item.image_ref),
        name = name,
        price = item.unit_price.display(),
        quantity = item.quantity
    )
}

/// Text for each summary field, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryText {
    pub item_count: String,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub discount: String,
    pub total: String,
}

impl SummaryText {
    pub fn from_summary(summary: &CartSummary) -> Self {
        let discount = if summary.has_discount() {
            format!("-{}", summary.discount.display())
        } else {
            summary.discount.display()
        };

        Self {
            item_count: summary.item_count.to_string(),
            subtotal: summary.subtotal.display(),
            shipping: summary.shipping.display(),
            tax: summary.tax.display(),
            discount,
            total: summary.total.display(),
        }
    }

    /// Pairs of `(selector, text)` in summary field order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        use crate::selectors::*;
        [
            (ITEM_COUNT, self.item_count.as_str()),
            (SUBTOTAL, self.subtotal.as_str()),
            (SHIPPING, self.shipping.as_str()),
            (TAX, self.tax.as_str()),
            (DISCOUNT, self.discount.as_str()),
            (TOTAL, self.total.as_str()),
        ]
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::cart::{LineItem, PricingPolicy};
    use storefront_commerce::{Amount, ItemId};

    fn item(id: &str, name: &str, price: f64, quantity: u32) -> LineItem {
        LineItem {
            quantity,
            ..LineItem::new(ItemId::new(id), name, Amount::new(price), format!("{}.jpg", id))
        }
    }

    #[test]
    fn test_empty_cart_block() {
        let html = render_cart_items(&CombinedView::new(&[], &[]));
        assert!(html.contains(r#"class="empty-cart""#));
        assert!(html.contains("Your cart is empty"));
        assert!(!html.contains("cart-header"));
    }

    #[test]
    fn test_header_counts_units_not_lines() {
        let primary = vec![item("a", "A", 10.0, 2)];
        let secondary = vec![item("b", "B", 5.0, 3)];
        let html = render_cart_items(&CombinedView::new(&primary, &secondary));

        assert!(html.contains("<h2>Your Items (5)</h2>"));
        assert_eq!(html.matches(r#"<div class="cart-item" "#).count(), 2);
        assert!(html.contains(r#"data-product-id="b" data-category="secondary""#));
        assert!(html.contains(r#"value="3""#));
        assert!(html.contains("$5.00"));
    }

    #[test]
    fn test_item_fields_are_escaped() {
        let primary = vec![item("x\"1", "<b>Boots</b> & co", 1.0, 1)];
        let html = render_cart_items(&CombinedView::new(&primary, &[]));

        assert!(html.contains("&lt;b&gt;Boots&lt;/b&gt; &amp; co"));
        assert!(html.contains(r#"data-product-id="x&quot;1""#));
        assert!(!html.contains("<b>Boots</b>"));
    }

    #[test]
    fn test_summary_text_rounds_at_display() {
        let primary = vec![item("a", "A", 33.333, 3)];
        let view = CombinedView::new(&primary, &[]);
        let summary = CartSummary::compute(&view, None, &PricingPolicy::default());
        let text = SummaryText::from_summary(&summary);

        assert_eq!(text.item_count, "3");
        assert_eq!(text.subtotal, "$100.00");
        assert_eq!(text.shipping, "$9.99");
        assert_eq!(text.tax, "$8.00");
        assert_eq!(text.discount, "$0.00");
        assert_eq!(text.total, "$117.99");
        assert_eq!(text.fields()[5], ("#total", "$117.99"));
    }
}
