//! Structured logging for the BenihCandi storefront.
//!
//! This crate provides:
//! - `PageId` - Identifier for one page load, attached to every entry
//! - `StructuredLogger` - Structured logging with page context
//! - `LogBuilder` - Fluent builder for entries with typed fields

mod logging;
mod page;

pub use logging::*;
pub use page::PageId;
