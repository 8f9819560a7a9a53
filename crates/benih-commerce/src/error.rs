//! Commerce error types.

use benih_cache::CacheError;
use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
///
/// Every variant except [`CommerceError::Cache`] describes rejected input:
/// the cart is left exactly as it was.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Requested quantity is below 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A required product field is missing or empty.
    #[error("Missing product field: {0}")]
    MissingField(&'static str),

    /// Price is negative or not a number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,

    /// Underlying storage failure.
    #[error("Storage error: {0}")]
    Cache(#[from] CacheError),
}

impl CommerceError {
    /// Whether the error is a rejected input rather than a storage failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Cache(_))
    }
}
