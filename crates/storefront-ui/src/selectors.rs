//! Attachment points between the cart and the page.
//!
//! These selectors are a contract with the page markup. Renaming one
//! breaks existing pages.

/// Header cart badge.
pub const CART_COUNT: &str = ".cart-count";
/// Cart badge inside the mobile menu.
pub const MOBILE_CART_COUNT: &str = ".mobile-cart-count";
/// Container the item list is rendered into. Its presence marks the cart view.
pub const CART_ITEMS: &str = "#cartItemsContainer";

pub const ITEM_COUNT: &str = "#itemCount";
pub const SUBTOTAL: &str = "#subtotal";
pub const SHIPPING: &str = "#shipping";
pub const TAX: &str = "#tax";
pub const DISCOUNT: &str = "#discount";
pub const TOTAL: &str = "#total";

/// Per-item controls.
pub const PLUS_BUTTON: &str = ".quantity-btn.plus-btn";
pub const MINUS_BUTTON: &str = ".quantity-btn.minus-btn";
pub const QUANTITY_INPUT: &str = ".quantity-input";
pub const REMOVE_BUTTON: &str = ".remove-item";

/// Item id attribute on controls and cart rows.
pub const PRODUCT_ID_ATTR: &str = "data-product-id";
/// Ledger attribute on controls and cart rows.
pub const CATEGORY_ATTR: &str = "data-category";

/// Transient notice element.
pub const NOTICE: &str = ".custom-alert";
pub const NOTICE_CLOSE: &str = ".custom-alert-close";

/// Cart page actions.
pub const PROMO_INPUT: &str = "#promoCode";
pub const APPLY_PROMO: &str = "#applyPromo";
pub const CHECKOUT_BUTTON: &str = "#checkoutBtn";

/// Add-to-cart buttons and their product attributes.
pub const ADD_TO_CART: &str = ".add-to-cart";
pub const PRODUCT_NAME_ATTR: &str = "data-product-name";
pub const PRODUCT_PRICE_ATTR: &str = "data-product-price";
pub const PRODUCT_IMAGE_ATTR: &str = "data-product-image";

/// Shop page.
pub const FILTER_BUTTON: &str = ".filter-btn";
pub const FILTER_ATTR: &str = "data-filter";
pub const PRODUCT_CARD: &str = ".product-card";
pub const PRODUCT_ACTIONS: &str = ".product-actions";
pub const PRODUCT_NAME: &str = "h3";
pub const PRODUCT_DESCRIPTION: &str = ".product-description";
pub const PRODUCT_PRICE: &str = ".product-price";
pub const CATEGORY_CARD: &str = ".category-card";
pub const PRODUCTS_SECTION: &str = ".products-section";
pub const WISHLIST_BUTTON: &str = ".wishlist-btn";

/// Share modal.
pub const SHARE_BUTTON: &str = ".share-btn";
pub const SHARE_MODAL: &str = "#shareModal";
pub const SHARE_MODAL_CLOSE: &str = "#shareModalClose";
pub const SHARE_LINK_INPUT: &str = "#shareLinkInput";
pub const COPY_LINK_BUTTON: &str = "#copyLinkBtn";
pub const SHARE_OPTION: &str = ".share-option";
pub const PLATFORM_ATTR: &str = "data-platform";

/// Contact page.
pub const FAQ_ITEM: &str = ".faq-item";
pub const FAQ_QUESTION: &str = ".faq-question";
pub const CONTACT_FORM: &str = "#contactForm";

/// Hero effects.
pub const HERO_SLIDE: &str = ".hero-bg";
pub const DISTORTION: &str = ".distortion";

/// Class toggled on active filter buttons, FAQ items and the open modal.
pub const ACTIVE_CLASS: &str = "active";

/// Badge selectors, updated on every page.
pub const BADGES: [&str; 2] = [CART_COUNT, MOBILE_CART_COUNT];

/// Summary field selectors, updated only on the cart page.
pub const SUMMARY_FIELDS: [&str; 6] = [ITEM_COUNT, SUBTOTAL, SHIPPING, TAX, DISCOUNT, TOTAL];

/// Whether an element's `class` attribute carries every class of a
/// compound class selector such as `.quantity-btn.plus-btn`.
pub fn has_classes(class_attr: &str, selector: &str) -> bool {
    let mut wanted = selector.split('.').filter(|c| !c.is_empty()).peekable();
    if wanted.peek().is_none() {
        return false;
    }
    wanted.all(|class| class_attr.split_whitespace().any(|have| have == class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_classes() {
        assert!(has_classes("quantity-btn plus-btn", PLUS_BUTTON));
        assert!(has_classes(" plus-btn  quantity-btn extra", PLUS_BUTTON));
        assert!(!has_classes("quantity-btn minus-btn", PLUS_BUTTON));
        assert!(!has_classes("quantity-btnx plus-btn", PLUS_BUTTON));
        assert!(has_classes("remove-item", REMOVE_BUTTON));
        assert!(!has_classes("remove-item", ""));
    }
}
