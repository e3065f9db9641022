//! Structured logging for the storefront cart.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with session and page context
//! - `LogBuilder` - Fluent builder for entries with typed fields
//! - `LogSink` - Where rendered entries go (stderr, browser console, or a test buffer)

mod logging;

pub use logging::*;
