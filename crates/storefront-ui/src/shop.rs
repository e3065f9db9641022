//! Shop page behaviors: category filter, wishlist, add-to-cart buttons.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront_commerce::cart::Category;
use storefront_commerce::config::AddToCartConfig;
use storefront_commerce::{CartSession, CommerceError, ItemId, NoticeKind, PresentationBinder};
use storefront_store::KeyValueStore;

use crate::error::UiError;
use crate::render::html_escape;
use crate::timer::{MaybeSend, TaskHandle};

/// Product card filter from a `data-filter` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` shows everything; anything else matches `data-category`.
    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "all" => CategoryFilter::All,
            other => CategoryFilter::Only(other.to_string()),
        }
    }

    /// Whether a card with this `data-category` stays visible.
    pub fn matches(&self, card_category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => category == card_category,
        }
    }

    /// Visibility for each card, in order.
    pub fn visibility<'a>(&self, cards: impl IntoIterator<Item = &'a str>) -> Vec<bool> {
        cards.into_iter().map(|c| self.matches(c)).collect()
    }

    /// Notice shown after filtering. `button_label` is the clicked button's text.
    pub fn notice(&self, button_label: &str) -> String {
        match self {
            CategoryFilter::All => "Showing All Products".to_string(),
            CategoryFilter::Only(_) => format!("Showing {}", button_label.trim()),
        }
    }
}

/// A `.filter-btn`: its `data-filter` value and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub filter: String,
    pub label: String,
}

/// The row of filter buttons. At most one is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBar {
    buttons: Vec<FilterButton>,
    active: Option<usize>,
}

impl FilterBar {
    pub fn new(buttons: Vec<FilterButton>) -> Self {
        Self {
            buttons,
            active: None,
        }
    }

    /// Click button `index`: make it the only active one and return the
    /// filter to apply with its notice text.
    pub fn click(&mut self, index: usize) -> Option<(CategoryFilter, String)> {
        let button = self.buttons.get(index)?;
        let filter = CategoryFilter::from_attr(&button.filter);
        let notice = filter.notice(&button.label);
        self.active = Some(index);
        Some((filter, notice))
    }

    /// A category card was clicked: click the button filtering on that
    /// category, if there is one.
    pub fn select_category(&mut self, category: &str) -> Option<(CategoryFilter, String)> {
        let index = self.buttons.iter().position(|b| b.filter == category)?;
        self.click(index)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// `active` flags for every button, in order.
    pub fn states(&self) -> Vec<bool> {
        (0..self.buttons.len()).map(|i| self.active == Some(i)).collect()
    }
}

/// What a product card shows when clicked outside its action buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ProductDetail {
    /// `None` unless the card has a name, price and description.
    pub fn from_card(
        name: Option<String>,
        price: Option<String>,
        description: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Some(Self {
            name: present(name)?,
            price: present(price)?,
            description: present(description)?,
        })
    }

    /// Whether a click shows the detail. Clicks on the card's action
    /// buttons or its add-to-cart button do their own thing.
    pub fn shows_on_click(inside_actions: bool, inside_add_to_cart: bool) -> bool {
        !inside_actions && !inside_add_to_cart
    }

    pub fn notice(&self) -> (String, NoticeKind) {
        (
            format!(
                "<strong>{}</strong><br>{}<br><br>{}",
                html_escape(&self.name),
                html_escape(&self.price),
                html_escape(&self.description)
            ),
            NoticeKind::Info,
        )
    }
}

/// Products the shopper has hearted on this page. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    ids: HashSet<String>,
}

impl Wishlist {
    /// Toggle a product. Returns whether it is now wishlisted, with the
    /// notice to show.
    pub fn toggle(&mut self, id: &str, name: &str) -> (bool, String, NoticeKind) {
        if self.ids.remove(id) {
            (
                false,
                format!("Removed \"<strong>{}</strong>\" from your wishlist!", name),
                NoticeKind::Info,
            )
        } else {
            self.ids.insert(id.to_string());
            (
                true,
                format!("Added \"<strong>{}</strong>\" to your wishlist!", name),
                NoticeKind::Success,
            )
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The `data-product-*` attributes of an add-to-cart button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAttributes {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: Category,
}

impl ProductAttributes {
    /// Collect the attributes, or `None` if any is missing or empty.
    /// A button without `data-category` belongs to the primary ledger.
    pub fn from_attrs(
        id: Option<String>,
        name: Option<String>,
        price: Option<String>,
        image: Option<String>,
        category: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let category = match category {
            Some(value) => value.parse().ok()?,
            None => Category::Primary,
        };
        Some(Self {
            id: present(id)?,
            name: present(name)?,
            price: present(price)?,
            image: present(image)?,
            category,
        })
    }
}

/// Label state of an add-to-cart button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartButton {
    original: String,
    added: Option<u32>,
}

impl AddToCartButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            original: label.into(),
            added: None,
        }
    }

    /// Show the quantity now in the cart.
    pub fn mark_added(&mut self, quantity: u32) {
        self.added = Some(quantity);
    }

    /// Back to the original label.
    pub fn reset(&mut self) {
        self.added = None;
    }

    pub fn label(&self) -> String {
        match self.added {
            Some(quantity) => format!("Added ({})", quantity),
            None => self.original.clone(),
        }
    }

    /// Whether the button carries the `added` class.
    pub fn is_added(&self) -> bool {
        self.added.is_some()
    }
}

/// Put the button's label back after `add_to_cart.reset_ms`, then hand
/// the button to `apply`. Keep the handle: a newer click should replace it
/// so an older timer cannot reset the newer label early.
pub fn schedule_reset<F>(
    button: &Arc<Mutex<AddToCartButton>>,
    config: &AddToCartConfig,
    apply: F,
) -> Result<TaskHandle, UiError>
where
    F: FnOnce(&AddToCartButton) + MaybeSend + 'static,
{
    let button = Arc::clone(button);
    TaskHandle::spawn_once(Duration::from_millis(config.reset_ms), move || {
        if let Ok(mut button) = button.lock() {
            button.reset();
            apply(&button);
        }
    })
}

/// Handle an add-to-cart click: add one unit and flip the button label.
/// Follow with [`schedule_reset`].
pub fn add_to_cart<S, B>(
    session: &mut CartSession<S, B>,
    product: &ProductAttributes,
    button: &mut AddToCartButton,
) -> Result<u32, CommerceError>
where
    S: KeyValueStore + Clone,
    B: PresentationBinder,
{
    let quantity = session.add_to_cart(
        product.category,
        ItemId::new(product.id.as_str()),
        &product.name,
        &product.price,
        &product.image,
    )?;
    button.mark_added(quantity);
    Ok(quantity)
}
