//! Simulated checkout.
//!
//! There is no payment step. A checkout only validates that the cart has
//! something in it and produces a summary for the page to log and show.

use serde::Serialize;

use crate::cart::{compute_totals, Cart, CartItem, CartTotals};
use crate::error::CommerceError;
use crate::ids::CheckoutRef;

/// What a simulated checkout would submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    /// Reference for correlating log lines.
    pub reference: CheckoutRef,
    /// Lines at the time of checkout.
    pub items: Vec<CartItem>,
    /// Totals at the time of checkout.
    pub totals: CartTotals,
}

/// Simulate a checkout of `cart`.
///
/// Fails with [`CommerceError::EmptyCart`] when there is nothing to buy.
pub fn simulate(cart: &Cart) -> Result<CheckoutSummary, CommerceError> {
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    Ok(CheckoutSummary {
        reference: CheckoutRef::generate(),
        items: cart.items().to_vec(),
        totals: compute_totals(cart),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewItem;
    use crate::money::Money;

    #[test]
    fn test_empty_cart_is_rejected() {
        assert!(matches!(simulate(&Cart::new()), Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_summary() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("Bibit A", Money::new(15000)).with_quantity(3))
            .unwrap();

        let summary = simulate(&cart).unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.totals.total, Money::new(45000));
        assert_eq!(summary.totals.count, 3);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["items"][0]["qty"], 3);
    }
}
