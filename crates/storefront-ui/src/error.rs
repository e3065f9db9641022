//! UI error types.

use thiserror::Error;

/// Errors from the presentation layer.
#[derive(Error, Debug)]
pub enum UiError {
    /// Timers need a running async runtime.
    #[error("No timer runtime available: {0}")]
    NoRuntime(String),

    /// Timer parameters out of range.
    #[error("Invalid timer: {0}")]
    InvalidTimer(String),

    /// The clipboard rejected a write.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Page element lookup or update failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// The cart could not be opened.
    #[error("Cart error: {0}")]
    Cart(#[from] storefront_commerce::CommerceError),

    /// A handler panicked while holding shared page state.
    #[error("Shared page state poisoned: {0}")]
    Poisoned(&'static str),

    /// Unrecognized share platform.
    #[error("Unknown share target: {0}")]
    UnknownShareTarget(String),
}
