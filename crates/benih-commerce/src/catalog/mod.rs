//! Catalog module.
//!
//! Product cards as listed on the shop page and the category filter tabs.

mod filter;

pub use filter::{CategoryFilter, ProductCard};
