//! Presentation side of the storefront.
//!
//! The cart core calls a [`PresentationBinder`](storefront_commerce::PresentationBinder);
//! this crate provides the markup it renders and two binders: [`MarkupBinder`]
//! over an in-memory set of targets, and (on wasm32) `DomBinder` over the
//! live page. It also holds the page effects that have nothing to do with
//! the cart:
//!
//! - **Notices**: one transient message at a time, auto-dismissed
//! - **Hero**: background slide rotation and pointer parallax
//! - **Shop**: category filter, wishlist, add-to-cart button feedback
//! - **FAQ**: single-open accordion
//! - **Share**: share modal, share links and copy-to-clipboard with fallback
//! - **Controls**: resolving clicked cart controls to cart operations
//! - **Contact**: contact form acknowledgement
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//! use storefront_observability::StructuredLogger;
//! use storefront_store::MemoryStore;
//! use storefront_ui::{MarkupBinder, NoticeBoard, Page};
//!
//! let binder = MarkupBinder::for_page(Page::Cart, NoticeBoard::default());
//! let mut session = CartSession::open(
//!     CartConfig::default(),
//!     MemoryStore::new(),
//!     binder,
//!     StructuredLogger::disabled(),
//! )?;
//! session.add_to_cart(Category::Primary, "gloves", "Gloves", "12.50", "gloves.jpg")?;
//!
//! assert_eq!(session.binder().content(".cart-count"), Some("1"));
//! assert_eq!(session.binder().content("#subtotal"), Some("$12.50"));
//! # Ok::<(), CommerceError>(())
//! ```

pub mod contact;
pub mod controls;
pub mod error;
pub mod faq;
pub mod hero;
pub mod markup;
pub mod notice;
pub mod page;
pub mod render;
pub mod selectors;
pub mod share;
pub mod shop;
pub mod timer;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod events;

pub use controls::{CartControl, ControlAction, ControlOutcome};
pub use error::UiError;
pub use markup::MarkupBinder;
pub use notice::{Notice, NoticeBoard};
pub use page::Page;
pub use timer::TaskHandle;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::contact::ContactMessage;
    pub use crate::controls::{checkout_with_follow_up, CartControl, ControlAction, ControlOutcome};
    pub use crate::error::UiError;
    pub use crate::faq::Accordion;
    pub use crate::hero::{parallax_transform, start_rotation, HeroRotation, SlideStyle};
    pub use crate::markup::MarkupBinder;
    pub use crate::notice::{Notice, NoticeBoard};
    pub use crate::page::Page;
    pub use crate::share::{
        copy_link, copy_to_clipboard, parse_platform, report_copy, schedule_close, schedule_copied_reset, share_url, Clipboard,
        CopyOutcome, ShareAction, ShareModal, ShareTarget, SharedProduct,
    };
    pub use crate::shop::{
        add_to_cart, schedule_reset, AddToCartButton, CategoryFilter, FilterBar, FilterButton,
        ProductAttributes, ProductDetail, Wishlist,
    };
    pub use crate::timer::TaskHandle;

    #[cfg(target_arch = "wasm32")]
    pub use crate::dom::DomBinder;
}
