//! Shopping cart module.
//!
//! Contains the per-category ledgers, the combined view over them, promotion
//! codes and the order summary.

mod combined;
mod ledger;
mod line_item;
mod promotion;
mod summary;

pub use combined::{CombinedEntry, CombinedView};
pub use ledger::{Ledger, LoadStatus, QuantityChange};
pub use line_item::{Category, LineItem};
pub use promotion::{
    normalize_code, standard_rules, Promotion, PromotionEffect, PromotionOutcome,
    PromotionRegistry, PromotionRule,
};
pub use summary::{CartSummary, PricingPolicy};
