//! Presentation binder interface.
//!
//! The cart core never touches the page directly. It calls a
//! [`PresentationBinder`] after every mutation, and the UI layer decides
//! what (if anything) exists to be updated.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::{CartSummary, CombinedView};

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
            NoticeKind::Info => "info",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callbacks from the cart core to whatever renders it.
///
/// Implementations must treat a missing attachment point as a no-op.
pub trait PresentationBinder {
    /// Whether the page shows the full cart (items and summary).
    fn has_cart_view(&self) -> bool;

    /// Re-render the combined item list.
    fn render_combined_cart(&mut self, view: &CombinedView<'_>);

    /// Update the unit count badges.
    fn update_badge(&mut self, units: u64);

    /// Update the summary fields.
    fn update_summary(&mut self, summary: &CartSummary);

    /// Show a transient notice. `message` may contain inline markup.
    fn show_notice(&mut self, message: &str, kind: NoticeKind);
}

/// Binder for pages without any cart elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBinder;

impl PresentationBinder for NullBinder {
    fn has_cart_view(&self) -> bool {
        false
    }

    fn render_combined_cart(&mut self, _view: &CombinedView<'_>) {}

    fn update_badge(&mut self, _units: u64) {}

    fn update_summary(&mut self, _summary: &CartSummary) {}

    fn show_notice(&mut self, _message: &str, _kind: NoticeKind) {}
}

impl<B: PresentationBinder + ?Sized> PresentationBinder for &mut B {
    fn has_cart_view(&self) -> bool {
        (**self).has_cart_view()
    }

    fn render_combined_cart(&mut self, view: &CombinedView<'_>) {
        (**self).render_combined_cart(view)
    }

    fn update_badge(&mut self, units: u64) {
        (**self).update_badge(units)
    }

    fn update_summary(&mut self, summary: &CartSummary) {
        (**self).update_summary(summary)
    }

    fn show_notice(&mut self, message: &str, kind: NoticeKind) {
        (**self).show_notice(message, kind)
    }
}

impl<B: PresentationBinder + ?Sized> PresentationBinder for Box<B> {
    fn has_cart_view(&self) -> bool {
        (**self).has_cart_view()
    }

    fn render_combined_cart(&mut self, view: &CombinedView<'_>) {
        (**self).render_combined_cart(view)
    }

    fn update_badge(&mut self, units: u64) {
        (**self).update_badge(units)
    }

    fn update_summary(&mut self, summary: &CartSummary) {
        (**self).update_summary(summary)
    }

    fn show_notice(&mut self, message: &str, kind: NoticeKind) {
        (**self).show_notice(message, kind)
    }
}
