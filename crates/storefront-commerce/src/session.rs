//! Cart session: both ledgers, the active promotion and the binder.
//!
//! One session lives for one page. It is created at page load, rehydrates
//! both ledgers from the store, and turns UI events into ledger mutations
//! followed by a refresh of whatever the binder can show.

use storefront_observability::StructuredLogger;
use storefront_store::KeyValueStore;

use crate::binder::{NoticeKind, PresentationBinder};
use crate::cart::{
    CartSummary, Category, CombinedView, Ledger, LineItem, LoadStatus, Promotion,
    PromotionOutcome, PromotionRegistry, QuantityChange,
};
use crate::checkout::CheckoutRequest;
use crate::config::{BelowMinimumPolicy, CartConfig};
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Amount;

const SAVE_FAILED_NOTICE: &str = "Your cart could not be saved on this device";

/// Orchestrates the cart for one page session.
pub struct CartSession<S, B> {
    config: CartConfig,
    primary: Ledger<S>,
    secondary: Ledger<S>,
    registry: PromotionRegistry,
    promotion: Option<Promotion>,
    binder: B,
    logger: StructuredLogger,
}

impl<S, B> CartSession<S, B>
where
    S: KeyValueStore + Clone,
    B: PresentationBinder,
{
    /// Open a session: load both ledgers and paint the initial state.
    ///
    /// Unreadable stored carts start empty. Only a `config` that fails
    /// [`CartConfig::validate`] is an error.
    pub fn open(
        config: CartConfig,
        store: S,
        binder: B,
        logger: StructuredLogger,
    ) -> Result<Self, CommerceError> {
        config.validate()?;
        let registry = config.promotion_registry()?;
        let primary = load_ledger(&config, Category::Primary, store.clone(), &logger);
        let secondary = load_ledger(&config, Category::Secondary, store, &logger);

        let mut session = Self {
            config,
            primary,
            secondary,
            registry,
            promotion: None,
            binder,
            logger,
        };
        session.refresh();
        Ok(session)
    }

    /// Add one unit of a product, returning its new quantity.
    ///
    /// `price_text` is the raw attribute value; anything that is not a
    /// non-negative number is rejected before the ledger is touched.
    pub fn add_to_cart(
        &mut self,
        category: Category,
        id: impl Into<ItemId>,
        name: &str,
        price_text: &str,
        image_ref: &str,
    ) -> Result<u32, CommerceError> {
        let id = id.into();
        let price = Amount::parse(price_text).map_err(|e| {
            self.logger
                .warn_builder("rejected add to cart")
                .field("category", category.as_str())
                .field("item_id", id.as_str())
                .field("price", price_text)
                .emit();
            e
        })?;

        let result = self
            .ledger_mut(category)
            .add(id.clone(), name, price, image_ref);
        let quantity = match self.tolerate_storage(category, result)? {
            Some(quantity) => quantity,
            None => self.ledger(category).quantity_of(&id).unwrap_or(1),
        };

        self.logger
            .debug_builder("item added")
            .field("category", category.as_str())
            .field("item_id", id.as_str())
            .field_u64("quantity", u64::from(quantity))
            .emit();

        self.binder.show_notice(
            &format!(
                "Added \"<strong>{}</strong>\" to your cart!<br>{}",
                name,
                price.display()
            ),
            NoticeKind::Success,
        );
        self.refresh();
        Ok(quantity)
    }

    /// Remove a line. Returns the removed line, or `None` if it wasn't there.
    pub fn remove_from_cart(
        &mut self,
        category: Category,
        id: &ItemId,
    ) -> Result<Option<LineItem>, CommerceError> {
        let existing = self.ledger(category).get(id).cloned();
        let result = self.ledger_mut(category).remove(id);
        self.tolerate_storage(category, result)?;

        if let Some(item) = &existing {
            self.logger
                .debug_builder("item removed")
                .field("category", category.as_str())
                .field("item_id", id.as_str())
                .emit();
            self.binder.show_notice(
                &format!("Removed <strong>{}</strong> from cart", item.name),
                NoticeKind::Info,
            );
        }
        self.refresh();
        Ok(existing)
    }

    /// Plus control: one more unit.
    pub fn increment(
        &mut self,
        category: Category,
        id: &ItemId,
    ) -> Result<QuantityChange, CommerceError> {
        match self.ledger(category).quantity_of(id) {
            Some(current) => self.set_quantity(category, id, i64::from(current) + 1),
            None => Ok(QuantityChange::NotFound),
        }
    }

    /// Minus control: one fewer unit. At quantity 1 the ignore policy keeps
    /// the line at 1 and still confirms the click; the remove policy drops it.
    pub fn decrement(
        &mut self,
        category: Category,
        id: &ItemId,
    ) -> Result<QuantityChange, CommerceError> {
        let Some(current) = self.ledger(category).quantity_of(id) else {
            return Ok(QuantityChange::NotFound);
        };
        let requested = match self.config.quantity.below_minimum {
            BelowMinimumPolicy::Ignore => (i64::from(current) - 1).max(1),
            BelowMinimumPolicy::Remove => i64::from(current) - 1,
        };
        self.set_quantity(category, id, requested)
    }

    /// Set a line's quantity, e.g. from the quantity input.
    pub fn set_quantity(
        &mut self,
        category: Category,
        id: &ItemId,
        requested: i64,
    ) -> Result<QuantityChange, CommerceError> {
        if requested < 1 {
            return match self.config.quantity.below_minimum {
                BelowMinimumPolicy::Ignore => {
                    self.logger
                        .debug_builder("quantity below minimum ignored")
                        .field("category", category.as_str())
                        .field("item_id", id.as_str())
                        .emit();
                    Ok(QuantityChange::BelowMinimum)
                }
                BelowMinimumPolicy::Remove => Ok(match self.remove_from_cart(category, id)? {
                    Some(_) => QuantityChange::Removed,
                    None => QuantityChange::NotFound,
                }),
            };
        }

        let previous = self.ledger(category).quantity_of(id);
        let result = self.ledger_mut(category).set_quantity(id, requested);
        let change = match self.tolerate_storage(category, result)? {
            Some(change) => change,
            None => match (previous, self.ledger(category).quantity_of(id)) {
                (Some(previous), Some(current)) => QuantityChange::Updated { previous, current },
                _ => QuantityChange::NotFound,
            },
        };

        if let QuantityChange::Updated { previous, current } = change {
            self.logger
                .debug_builder("quantity updated")
                .field("category", category.as_str())
                .field("item_id", id.as_str())
                .field_u64("previous", u64::from(previous))
                .field_u64("quantity", u64::from(current))
                .emit();
            self.binder.show_notice("Cart updated", NoticeKind::Info);
            self.refresh();
        }
        Ok(change)
    }

    /// Evaluate a promotion code typed by the shopper.
    pub fn apply_promotion(&mut self, input: &str) -> PromotionOutcome {
        let outcome = self.registry.apply(input, &mut self.promotion);
        match &outcome {
            PromotionOutcome::Applied(promotion) => {
                self.logger
                    .info_builder("promotion applied")
                    .field("code", promotion.code())
                    .emit();
                self.binder
                    .show_notice(&applied_message(promotion), NoticeKind::Success);
            }
            PromotionOutcome::Rejected { code } => {
                self.logger
                    .info_builder("promotion rejected")
                    .field("code", code.as_str())
                    .emit();
                self.binder
                    .show_notice("Invalid promo code", NoticeKind::Error);
            }
            PromotionOutcome::Blank => return outcome,
        }
        self.refresh();
        outcome
    }

    /// Start checkout. Returns `None` (with a warning) for an empty cart.
    pub fn checkout(&mut self) -> Option<CheckoutRequest> {
        if self.primary.is_empty() && self.secondary.is_empty() {
            self.binder
                .show_notice("Your cart is empty!", NoticeKind::Warning);
            return None;
        }

        let request = CheckoutRequest::snapshot(
            &self.combined_view(),
            self.summary(),
            self.promotion.as_ref(),
        );
        self.logger
            .info_builder("checkout started")
            .field_u64("units", request.units())
            .field_f64("total", request.summary.total.rounded())
            .emit();
        self.binder
            .show_notice("Proceeding to checkout...", NoticeKind::Info);
        Some(request)
    }

    /// Push the current state to the binder: badge always, items and
    /// summary only when the page has a cart view.
    pub fn refresh(&mut self) {
        let units = self.primary.total_units() + self.secondary.total_units();
        self.binder.update_badge(units);

        if !self.binder.has_cart_view() {
            return;
        }
        let view = CombinedView::from_ledgers(&self.primary, &self.secondary);
        let summary = CartSummary::compute(&view, self.promotion.as_ref(), &self.config.pricing);
        self.binder.render_combined_cart(&view);
        self.binder.update_summary(&summary);
    }

    /// Current totals.
    pub fn summary(&self) -> CartSummary {
        CartSummary::compute(
            &self.combined_view(),
            self.promotion.as_ref(),
            &self.config.pricing,
        )
    }

    /// Both ledgers, primary first.
    pub fn combined_view(&self) -> CombinedView<'_> {
        CombinedView::from_ledgers(&self.primary, &self.secondary)
    }

    /// Units across both ledgers (the badge count).
    pub fn total_units(&self) -> u64 {
        self.primary.total_units() + self.secondary.total_units()
    }

    /// The active promotion.
    pub fn applied_promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Ledger for a category.
    pub fn ledger(&self, category: Category) -> &Ledger<S> {
        match category {
            Category::Primary => &self.primary,
            Category::Secondary => &self.secondary,
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub fn binder(&self) -> &B {
        &self.binder
    }

    pub fn binder_mut(&mut self) -> &mut B {
        &mut self.binder
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    fn ledger_mut(&mut self, category: Category) -> &mut Ledger<S> {
        match category {
            Category::Primary => &mut self.primary,
            Category::Secondary => &mut self.secondary,
        }
    }

    /// A failed write leaves the in-memory ledger updated; report it and
    /// carry on. Any other error propagates.
    fn tolerate_storage<T>(
        &mut self,
        category: Category,
        result: Result<T, CommerceError>,
    ) -> Result<Option<T>, CommerceError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(CommerceError::StorageError(reason)) => {
                self.logger
                    .error_builder("cart write failed")
                    .field("category", category.as_str())
                    .field("key", self.ledger(category).storage_key())
                    .field("reason", reason)
                    .emit();
                self.binder
                    .show_notice(SAVE_FAILED_NOTICE, NoticeKind::Warning);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn load_ledger<S: KeyValueStore + Clone>(
    config: &CartConfig,
    category: Category,
    store: S,
    logger: &StructuredLogger,
) -> Ledger<S> {
    let key = config.storage_key(category).to_string();
    match Ledger::load(category, key.clone(), store.clone()) {
        Ok((ledger, status)) => {
            log_load_status(logger, category, &key, &status);
            ledger
        }
        Err(error) => {
            logger
                .error_builder("cart load failed")
                .field("category", category.as_str())
                .field("key", key.as_str())
                .field("reason", error.to_string())
                .emit();
            Ledger::empty(category, key, store)
        }
    }
}

fn log_load_status(logger: &StructuredLogger, category: Category, key: &str, status: &LoadStatus) {
    match status {
        LoadStatus::Missing => logger
            .debug_builder("no stored cart")
            .field("category", category.as_str())
            .field("key", key)
            .emit(),
        LoadStatus::Loaded { kept, dropped: 0 } => logger
            .debug_builder("cart loaded")
            .field("category", category.as_str())
            .field_u64("lines", *kept as u64)
            .emit(),
        LoadStatus::Loaded { kept, dropped } => logger
            .warn_builder("cart loaded with invalid lines dropped")
            .field("category", category.as_str())
            .field("key", key)
            .field_u64("lines", *kept as u64)
            .field_u64("dropped", *dropped as u64)
            .emit(),
        LoadStatus::Recovered { reason } => logger
            .warn_builder("stored cart unreadable, starting empty")
            .field("category", category.as_str())
            .field("key", key)
            .field("reason", reason.as_str())
            .emit(),
    }
}

/// Promotion notice text.
fn applied_message(promotion: &Promotion) -> String {
    match promotion {
        Promotion::FreeShipping { .. } => "Promo code applied! Free shipping added.".to_string(),
        Promotion::PercentDiscount { fraction, .. } if *fraction > 0.0 => {
            let percent = (fraction * 10_000.0).round() / 100.0;
            format!("Promo code applied! {}% discount added.", percent)
        }
        Promotion::PercentDiscount { .. } => "Promo code applied!".to_string(),
    }
}
