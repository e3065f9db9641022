//! Shopping cart core for the storefront.
//!
//! This crate holds everything about the cart that doesn't depend on a page:
//!
//! - **Ledgers**: one persisted, ordered list of line items per category
//! - **Combined view**: both ledgers tagged by category, for display and totals
//! - **Promotions**: a fixed registry of codes, at most one active
//! - **Summary**: subtotal, shipping, tax, discount and total
//! - **Session**: turns UI events into ledger mutations and binder calls
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//! use storefront_observability::StructuredLogger;
//! use storefront_store::MemoryStore;
//!
//! let mut session = CartSession::open(
//!     CartConfig::default(),
//!     MemoryStore::new(),
//!     NullBinder,
//!     StructuredLogger::disabled(),
//! )?;
//!
//! session.add_to_cart(Category::Primary, "boots-01", "Work Boots", "50.00", "boots.jpg")?;
//! session.add_to_cart(Category::Primary, "boots-01", "Work Boots", "50.00", "boots.jpg")?;
//! session.apply_promotion("save10");
//!
//! let summary = session.summary();
//! assert_eq!(summary.total.display(), "$107.99");
//! # Ok::<(), CommerceError>(())
//! ```

pub mod binder;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod session;

pub use binder::{NoticeKind, NullBinder, PresentationBinder};
pub use config::CartConfig;
pub use error::CommerceError;
pub use ids::ItemId;
pub use money::Amount;
pub use session::CartSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::binder::{NoticeKind, NullBinder, PresentationBinder};
    pub use crate::error::CommerceError;
    pub use crate::ids::ItemId;
    pub use crate::money::Amount;

    // Cart
    pub use crate::cart::{
        CartSummary, Category, CombinedEntry, CombinedView, Ledger, LineItem, LoadStatus,
        PricingPolicy, Promotion, PromotionOutcome, PromotionRegistry, PromotionRule,
        QuantityChange,
    };

    // Session
    pub use crate::checkout::{CheckoutLine, CheckoutRequest};
    pub use crate::config::{BelowMinimumPolicy, CartConfig};
    pub use crate::session::CartSession;
}
