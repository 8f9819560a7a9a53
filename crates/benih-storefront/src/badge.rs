//! Cart-count indicator in the navbar.

use std::cell::RefCell;

use benih_commerce::cart::{Cart, CartTotals};
use benih_commerce::store::CartListener;

/// State of every cart-count element on the page.
///
/// Shows the total quantity and hides itself while the cart is empty.
#[derive(Debug, Default)]
pub struct CartBadge {
    state: RefCell<BadgeState>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct BadgeState {
    count: u64,
    refreshed: bool,
}

impl CartBadge {
    /// Hidden badge, not refreshed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text content of the indicator.
    pub fn text(&self) -> String {
        self.state.borrow().count.to_string()
    }

    /// Current count.
    pub fn count(&self) -> u64 {
        self.state.borrow().count
    }

    /// Shown only while the cart holds something.
    pub fn is_visible(&self) -> bool {
        self.state.borrow().count > 0
    }

    /// CSS `display` value of the indicator.
    pub fn display(&self) -> &'static str {
        if self.is_visible() {
            "flex"
        } else {
            "none"
        }
    }

    /// Whether the badge has been updated since the page loaded.
    pub fn is_refreshed(&self) -> bool {
        self.state.borrow().refreshed
    }
}

impl CartListener for CartBadge {
    fn cart_changed(&self, _cart: &Cart, totals: &CartTotals) {
        let mut state = self.state.borrow_mut();
        state.count = totals.count;
        state.refreshed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benih_commerce::money::Money;

    #[test]
    fn test_hidden_when_empty() {
        let badge = CartBadge::new();
        badge.cart_changed(&Cart::new(), &CartTotals::default());
        assert!(!badge.is_visible());
        assert_eq!(badge.display(), "none");
        assert_eq!(badge.text(), "0");
        assert!(badge.is_refreshed());
    }

    #[test]
    fn test_shows_count() {
        let badge = CartBadge::new();
        let totals = CartTotals {
            total: Money::new(45000),
            count: 3,
        };
        badge.cart_changed(&Cart::new(), &totals);
        assert_eq!(badge.text(), "3");
        assert_eq!(badge.display(), "flex");
    }
}
