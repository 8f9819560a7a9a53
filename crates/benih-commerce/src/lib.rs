//! Cart, catalog and checkout domain logic for the BenihCandi storefront.
//!
//! - **Cart**: line items merged by identity, totals
//! - **Store**: the cart persisted under a fixed key of a key-value store,
//!   with change notification
//! - **Catalog**: category filter for the product listing
//! - **Checkout**: simulated checkout
//!
//! # Example
//!
//! ```rust
//! use benih_cache::MemoryStore;
//! use benih_commerce::prelude::*;
//! use benih_observability::StructuredLogger;
//!
//! let store = CartStore::new(MemoryStore::new(), StructuredLogger::default());
//! store.add(NewItem::new("Bibit A", Money::new(15000))).unwrap();
//! store.add(NewItem::new("Bibit A", Money::new(15000)).with_quantity(2)).unwrap();
//!
//! let totals = store.totals();
//! assert_eq!(totals.count, 3);
//! assert_eq!(totals.total.display_amount(), "45.000");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod store;

pub use error::CommerceError;
pub use ids::{CheckoutRef, ProductId};
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{CheckoutRef, ProductId};
    pub use crate::money::Money;

    pub use crate::cart::{
        compute_totals, AddOutcome, Cart, CartItem, CartTotals, ItemKey, NewItem,
    };
    pub use crate::catalog::{CategoryFilter, ProductCard};
    pub use crate::checkout::{simulate as simulate_checkout, CheckoutSummary};
    pub use crate::store::{CartListener, CartStore, LoadOutcome, CART_KEY, USER_KEY};
}
