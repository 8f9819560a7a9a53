//! Cart totals.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::money::Money;

/// Money total and item count of a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of `price * quantity` over all lines.
    pub total: Money,
    /// Sum of quantities over all lines.
    pub count: u64,
}

impl CartTotals {
    /// Whether the cart holds nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Compute the totals of a cart.
///
/// Pure. Decoding already mapped missing prices to 0 and missing
/// quantities to 1; arithmetic saturates rather than failing.
pub fn compute_totals(cart: &Cart) -> CartTotals {
    cart.iter().fold(CartTotals::default(), |acc, item| CartTotals {
        total: acc.total.saturating_add(item.line_total()),
        count: acc.count.saturating_add(u64::from(item.quantity)),
    })
}
