//! Presentation binder over rendered markup.
//!
//! `MarkupBinder` keeps the content of each attachment point the page
//! actually has. Updates aimed at a target the page lacks are dropped, so
//! the same binder serves every page. It is what the cart uses outside the
//! browser, and it is what the tests inspect.

use std::collections::BTreeMap;

use storefront_commerce::cart::{CartSummary, CombinedView};
use storefront_commerce::{NoticeKind, PresentationBinder};

use crate::notice::{Notice, NoticeBoard};
use crate::page::Page;
use crate::render::{render_cart_items, SummaryText};
use crate::selectors;

/// Binder writing into an in-memory set of targets.
#[derive(Debug, Clone, Default)]
pub struct MarkupBinder {
    targets: BTreeMap<&'static str, String>,
    notices: NoticeBoard,
}

impl MarkupBinder {
    /// A binder with no targets.
    pub fn new(notices: NoticeBoard) -> Self {
        Self {
            targets: BTreeMap::new(),
            notices,
        }
    }

    /// The targets a storefront page has: badges everywhere, items and
    /// summary fields on the cart page.
    pub fn for_page(page: Page, notices: NoticeBoard) -> Self {
        let mut binder = Self::new(notices);
        for selector in selectors::BADGES {
            binder.attach(selector);
        }
        if page.has_cart_view() {
            binder.attach(selectors::CART_ITEMS);
            for selector in selectors::SUMMARY_FIELDS {
                binder.attach(selector);
            }
        }
        binder
    }

    /// Add an attachment point.
    pub fn attach(&mut self, selector: &'static str) -> &mut Self {
        self.targets.entry(selector).or_default();
        self
    }

    /// Remove an attachment point.
    pub fn detach(&mut self, selector: &str) -> &mut Self {
        self.targets.remove(selector);
        self
    }

    /// Current content of a target, `None` if the page lacks it.
    pub fn content(&self, selector: &str) -> Option<&str> {
        self.targets.get(selector).map(String::as_str)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    fn set(&mut self, selector: &str, value: impl Into<String>) {
        if let Some(slot) = self.targets.get_mut(selector) {
            *slot = value.into();
        }
    }
}

impl PresentationBinder for MarkupBinder {
    fn has_cart_view(&self) -> bool {
        self.targets.contains_key(selectors::CART_ITEMS)
    }

    fn render_combined_cart(&mut self, view: &CombinedView<'_>) {
        self.set(selectors::CART_ITEMS, render_cart_items(view));
    }

    fn update_badge(&mut self, units: u64) {
        let text = units.to_string();
        for selector in selectors::BADGES {
            self.set(selector, text.as_str());
        }
    }

    fn update_summary(&mut self, summary: &CartSummary) {
        let text = SummaryText::from_summary(summary);
        for (selector, value) in text.fields() {
            self.set(selector, value);
        }
    }

    fn show_notice(&mut self, message: &str, kind: NoticeKind) {
        self.notices.show(message, kind);
    }
}
