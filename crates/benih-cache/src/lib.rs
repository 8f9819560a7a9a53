//! Type-safe key-value storage layer for the BenihCandi storefront.
//!
//! The storefront keeps its whole state in a handful of keys of a local
//! key-value store such as the browser's `localStorage`.
//! This crate abstracts that store behind [`RawStore`] and layers automatic
//! JSON serialization on top with [`Cache`].
//!
//! # Example
//!
//! ```rust
//! use benih_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Counter {
//!     hits: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("counter", &Counter { hits: 3 }).unwrap();
//!
//! let counter: Option<Counter> = cache.get("counter").unwrap();
//! assert_eq!(counter, Some(Counter { hits: 3 }));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, RawStore};

#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, RawStore};
}
