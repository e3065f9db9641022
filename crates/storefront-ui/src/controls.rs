//! Cart page controls.
//!
//! Turns a click on a rendered cart row (or an edit of its quantity input)
//! into a ledger operation. Every control carries `data-product-id` and
//! `data-category`, so the dispatch never has to guess which ledger an id
//! belongs to.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront_commerce::cart::{Category, LineItem, QuantityChange};
use storefront_commerce::checkout::CheckoutRequest;
use storefront_commerce::{CartSession, CommerceError, ItemId, NoticeKind, PresentationBinder};
use storefront_store::KeyValueStore;

use crate::error::UiError;
use crate::selectors::{self, has_classes};
use crate::timer::{MaybeSend, TaskHandle};

/// Shown a moment after checkout starts.
pub const CHECKOUT_FOLLOW_UP: &str = "Checkout functionality would be implemented here";

/// What a control asks the cart to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Increment,
    Decrement,
    Remove,
    SetQuantity(i64),
}

/// A resolved control event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartControl {
    pub action: ControlAction,
    pub category: Category,
    pub id: ItemId,
}

/// Result of applying a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOutcome {
    Quantity(QuantityChange),
    Removed(Option<LineItem>),
}

impl CartControl {
    /// Resolve a clicked element from its `class`, `data-product-id` and
    /// `data-category` attributes. `None` if the element is not a cart
    /// control, has no id, or names an unknown category. A missing
    /// category means the primary ledger.
    pub fn from_element_attrs(
        class_attr: &str,
        id: Option<&str>,
        category: Option<&str>,
    ) -> Option<Self> {
        let action = if has_classes(class_attr, selectors::PLUS_BUTTON) {
            ControlAction::Increment
        } else if has_classes(class_attr, selectors::MINUS_BUTTON) {
            ControlAction::Decrement
        } else if has_classes(class_attr, selectors::REMOVE_BUTTON) {
            ControlAction::Remove
        } else {
            return None;
        };
        Self::keyed(action, id, category)
    }

    /// Resolve an edited quantity input. Text that is not a whole number
    /// is dropped; out-of-range numbers go to the below-minimum policy.
    pub fn from_quantity_input(
        value: &str,
        id: Option<&str>,
        category: Option<&str>,
    ) -> Option<Self> {
        let quantity = value.trim().parse::<i64>().ok()?;
        Self::keyed(ControlAction::SetQuantity(quantity), id, category)
    }

    fn keyed(action: ControlAction, id: Option<&str>, category: Option<&str>) -> Option<Self> {
        let id = id.map(str::trim).filter(|id| !id.is_empty())?;
        let category = match category {
            Some(value) => value.parse().ok()?,
            None => Category::Primary,
        };
        Some(Self {
            action,
            category,
            id: ItemId::new(id),
        })
    }

    /// Run the operation against the session.
    pub fn apply<S, B>(&self, session: &mut CartSession<S, B>) -> Result<ControlOutcome, CommerceError>
    where
        S: KeyValueStore + Clone,
        B: PresentationBinder,
    {
        let (category, id) = (self.category, &self.id);
        let outcome = match self.action {
            ControlAction::Increment => ControlOutcome::Quantity(session.increment(category, id)?),
            ControlAction::Decrement => ControlOutcome::Quantity(session.decrement(category, id)?),
            ControlAction::SetQuantity(quantity) => {
                ControlOutcome::Quantity(session.set_quantity(category, id, quantity)?)
            }
            ControlAction::Remove => ControlOutcome::Removed(session.remove_from_cart(category, id)?),
        };
        Ok(outcome)
    }
}

/// Start checkout and, if it went ahead, schedule the follow-up notice
/// after `notices.checkout_follow_up_ms`. Dropping the handle cancels it.
pub fn checkout_with_follow_up<S, B>(
    session: &Arc<Mutex<CartSession<S, B>>>,
) -> Result<Option<(CheckoutRequest, TaskHandle)>, UiError>
where
    S: KeyValueStore + Clone + MaybeSend + 'static,
    B: PresentationBinder + MaybeSend + 'static,
{
    let (request, delay) = {
        let mut guard = session.lock().map_err(|_| UiError::Poisoned("cart session"))?;
        let delay = Duration::from_millis(guard.config().notices.checkout_follow_up_ms);
        (guard.checkout(), delay)
    };
    let Some(request) = request else {
        return Ok(None);
    };

    let shared = Arc::clone(session);
    let follow_up = TaskHandle::spawn_once(delay, move || {
        if let Ok(mut session) = shared.lock() {
            session
                .binder_mut()
                .show_notice(CHECKOUT_FOLLOW_UP, NoticeKind::Info);
        }
    })?;
    Ok(Some((request, follow_up)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupBinder;
    use crate::notice::NoticeBoard;
    use crate::page::Page;
    use storefront_commerce::CartConfig;
    use storefront_observability::StructuredLogger;
    use storefront_store::MemoryStore;

    fn session() -> CartSession<MemoryStore, MarkupBinder> {
        CartSession::open(
            CartConfig::default(),
            MemoryStore::new(),
            MarkupBinder::for_page(Page::Cart, NoticeBoard::default()),
            StructuredLogger::disabled(),
        )
        .unwrap()
    }

    #[test]
    fn test_resolves_rendered_controls() {
        let plus =
            CartControl::from_element_attrs("quantity-btn plus-btn", Some("x"), Some("secondary"))
                .unwrap();
        assert_eq!(plus.action, ControlAction::Increment);
        assert_eq!(plus.category, Category::Secondary);
        assert_eq!(plus.id, ItemId::new("x"));

        let minus = CartControl::from_element_attrs("quantity-btn minus-btn", Some("x"), None).unwrap();
        assert_eq!(minus.action, ControlAction::Decrement);
        assert_eq!(minus.category, Category::Primary);

        let remove = CartControl::from_element_attrs("remove-item", Some("x"), Some("primary"));
        assert_eq!(remove.map(|c| c.action), Some(ControlAction::Remove));
    }

    #[test]
    fn test_ignores_other_elements() {
        assert!(CartControl::from_element_attrs("cart-item", Some("x"), None).is_none());
        assert!(CartControl::from_element_attrs("remove-item", None, None).is_none());
        assert!(CartControl::from_element_attrs("remove-item", Some(" "), None).is_none());
        assert!(CartControl::from_element_attrs("remove-item", Some("x"), Some("garden")).is_none());
        assert!(CartControl::from_quantity_input("two", Some("x"), None).is_none());
        assert_eq!(
            CartControl::from_quantity_input(" 4 ", Some("x"), None).map(|c| c.action),
            Some(ControlAction::SetQuantity(4))
        );
    }

    #[test]
    fn test_controls_drive_the_right_ledger() {
        let mut session = session();
        session.add_to_cart(Category::Primary, "x", "Gloves", "10", "g.jpg").unwrap();
        session.add_to_cart(Category::Secondary, "x", "Socks", "4", "s.jpg").unwrap();

        let plus = CartControl::from_element_attrs("quantity-btn plus-btn", Some("x"), Some("secondary"))
            .unwrap();
        assert_eq!(
            plus.apply(&mut session).unwrap(),
            ControlOutcome::Quantity(QuantityChange::Updated { previous: 1, current: 2 })
        );
        assert_eq!(session.ledger(Category::Primary).quantity_of(&ItemId::new("x")), Some(1));

        let minus = CartControl::from_element_attrs("quantity-btn minus-btn", Some("x"), Some("primary"))
            .unwrap();
        minus.apply(&mut session).unwrap();
        assert_eq!(session.ledger(Category::Primary).quantity_of(&ItemId::new("x")), Some(1));
        assert_eq!(session.binder().notice().unwrap().message, "Cart updated");

        let remove = CartControl::from_element_attrs("remove-item", Some("x"), Some("primary")).unwrap();
        let outcome = remove.apply(&mut session).unwrap();
        assert!(matches!(outcome, ControlOutcome::Removed(Some(ref item)) if item.name == "Gloves"));
        assert_eq!(session.total_units(), 2);
        assert_eq!(session.binder().content(".cart-count"), Some("2"));

        let typed = CartControl::from_quantity_input("5", Some("x"), Some("secondary")).unwrap();
        typed.apply(&mut session).unwrap();
        assert_eq!(session.total_units(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_follow_up_notice() {
        let shared = Arc::new(Mutex::new(session()));
        assert!(checkout_with_follow_up(&shared).unwrap().is_none());
        assert_eq!(
            shared.lock().unwrap().binder().notice().unwrap().message,
            "Your cart is empty!"
        );

        shared
            .lock()
            .unwrap()
            .add_to_cart(Category::Primary, "v", "Vest", "25", "v.jpg")
            .unwrap();
        let (request, _follow_up) = checkout_with_follow_up(&shared).unwrap().unwrap();
        assert_eq!(request.units(), 1);
        assert_eq!(
            shared.lock().unwrap().binder().notice().unwrap().message,
            "Proceeding to checkout..."
        );

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(
            shared.lock().unwrap().binder().notice().unwrap().message,
            "Proceeding to checkout..."
        );
        tokio::time::sleep(Duration::from_millis(2)).await;
        let guard = shared.lock().unwrap();
        let notice = guard.binder().notice().unwrap();
        assert_eq!(notice.message, CHECKOUT_FOLLOW_UP);
        assert_eq!(notice.kind, NoticeKind::Info);
    }
}
