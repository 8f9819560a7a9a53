//! Shopping cart module.
//!
//! Contains the cart document, its line items and totals.

mod cart;
mod item;
mod totals;

pub use cart::{AddOutcome, Cart};
pub use item::{CartItem, ItemKey, NewItem};
pub use totals::{compute_totals, CartTotals};
