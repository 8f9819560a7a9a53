//! The cart document and its in-memory operations.

use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, ItemKey, NewItem};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// A shopping cart.
///
/// Items keep insertion order, which is also display order. At most one
/// item exists per [`ItemKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CartDocument")]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Wire shape of the persisted document: `{"items": [...]}`.
#[derive(Deserialize)]
struct CartDocument {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl From<CartDocument> for Cart {
    fn from(doc: CartDocument) -> Self {
        Cart::from_items(doc.items)
    }
}

/// Result of adding a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Key of the line that received the product.
    pub key: ItemKey,
    /// Name of that line.
    pub name: String,
    /// Line quantity after the add.
    pub quantity: u32,
    /// Whether an existing line was incremented.
    pub merged: bool,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, merging any that share an identity.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            match cart.find_index(item.id.as_ref(), &item.name) {
                Some(idx) => {
                    let existing = &mut cart.items[idx];
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add a product, merging into an existing line with the same identity.
    ///
    /// Lookup is id-first: a line with the same product id wins, otherwise
    /// a line with the same name. Returns an error, leaving the cart
    /// untouched, when the name is blank, the price is negative or the
    /// merged quantity would overflow.
    pub fn add(&mut self, item: NewItem) -> Result<AddOutcome, CommerceError> {
        if item.name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        if item.price.is_negative() {
            return Err(CommerceError::InvalidPrice(item.price.rupiah().to_string()));
        }

        let added = item.effective_quantity();
        if let Some(idx) = self.find_index(item.id.as_ref(), &item.name) {
            let existing = &mut self.items[idx];
            existing.quantity = existing
                .quantity
                .checked_add(added)
                .ok_or(CommerceError::Overflow)?;
            return Ok(AddOutcome {
                key: existing.key(),
                name: existing.name.clone(),
                quantity: existing.quantity,
                merged: true,
            });
        }

        let line = item.into_item();
        let outcome = AddOutcome {
            key: line.key(),
            name: line.name.clone(),
            quantity: line.quantity,
            merged: false,
        };
        self.items.push(line);
        Ok(outcome)
    }

    /// Set the quantity of a line.
    ///
    /// Quantities below 1 are rejected, not clamped. Quantities that do not
    /// fit a line are [`CommerceError::Overflow`].
    pub fn set_quantity(&mut self, key: &ItemKey, quantity: i64) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let quantity = u32::try_from(quantity).map_err(|_| CommerceError::Overflow)?;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.matches(key))
            .ok_or_else(|| CommerceError::ItemNotInCart(key.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Remove a line, returning it.
    pub fn remove(&mut self, key: &ItemKey) -> Result<CartItem, CommerceError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.matches(key))
            .ok_or_else(|| CommerceError::ItemNotInCart(key.to_string()))?;
        Ok(self.items.remove(idx))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up a line by key.
    pub fn get(&self, key: &ItemKey) -> Option<&CartItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    /// Key of the line at display position `index`.
    pub fn key_at(&self, index: usize) -> Option<ItemKey> {
        self.items.get(index).map(CartItem::key)
    }

    /// Lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over lines in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_index(&self, id: Option<&ProductId>, name: &str) -> Option<usize> {
        if let Some(id) = id {
            if let Some(idx) = self.items.iter().position(|i| i.id.as_ref() == Some(id)) {
                return Some(idx);
            }
        }
        self.items.iter().position(|i| i.name == name)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_cart_starts_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_add_by_name_merges() {
        let mut cart = Cart::new();
        let first = cart.add(NewItem::new("A", Money::new(10))).unwrap();
        assert!(!first.merged);

        let second = cart.add(NewItem::new("A", Money::new(10)).with_quantity(2)).unwrap();
        assert!(second.merged);
        assert_eq!(second.quantity, 3);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_by_id_merges_despite_renamed_product() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("Bibit A", Money::new(10)).with_id("p1")).unwrap();
        let outcome = cart
            .add(NewItem::new("Bibit A (baru)", Money::new(10)).with_id("p1"))
            .unwrap();
        assert!(outcome.merged);
        assert_eq!(outcome.name, "Bibit A");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_falls_back_to_name_when_id_unknown() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("Bibit A", Money::new(10))).unwrap();
        let outcome = cart.add(NewItem::new("Bibit A", Money::new(10)).with_id("p9")).unwrap();
        assert!(outcome.merged);
        assert_eq!(outcome.key, ItemKey::Name("Bibit A".to_string()));
    }

    #[test]
    fn test_distinct_items_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("B", Money::new(1))).unwrap();
        cart.add(NewItem::new("A", Money::new(1))).unwrap();
        cart.add(NewItem::new("C", Money::new(1)).with_id("c")).unwrap();

        let names: Vec<&str> = cart.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(cart.key_at(2), Some(ItemKey::Id(ProductId::new("c"))));
        assert_eq!(cart.key_at(3), None);
    }

    #[test]
    fn test_add_rejects_blank_name_and_negative_price() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(NewItem::new("  ", Money::new(10))),
            Err(CommerceError::MissingField("name"))
        ));
        assert!(matches!(
            cart.add(NewItem::new("A", Money::new(-1))),
            Err(CommerceError::InvalidPrice(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("A", Money::new(1)).with_quantity(u32::MAX)).unwrap();
        assert!(matches!(
            cart.add(NewItem::new("A", Money::new(1))),
            Err(CommerceError::Overflow)
        ));
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        let key = cart.add(NewItem::new("A", Money::new(10))).unwrap().key;

        cart.set_quantity(&key, 5).unwrap();
        assert_eq!(cart.get(&key).unwrap().quantity, 5);
    }

    #[test]
    fn test_set_quantity_below_one_is_rejected() {
        let mut cart = Cart::new();
        let key = cart.add(NewItem::new("A", Money::new(10)).with_quantity(2)).unwrap().key;
        let before = cart.clone();

        for q in [0, -1, i64::MIN] {
            assert!(matches!(
                cart.set_quantity(&key, q),
                Err(CommerceError::InvalidQuantity(_))
            ));
        }
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_above_u32_overflows() {
        let mut cart = Cart::new();
        let key = cart.add(NewItem::new("A", Money::new(10))).unwrap().key;

        let result = cart.set_quantity(&key, i64::from(u32::MAX) + 1);
        assert!(matches!(result, Err(CommerceError::Overflow)));
        assert_eq!(cart.get(&key).unwrap().quantity, 1);

        cart.set_quantity(&key, i64::from(u32::MAX)).unwrap();
        assert_eq!(cart.get(&key).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_unknown_key() {
        let mut cart = Cart::new();
        let result = cart.set_quantity(&ItemKey::Name("ghost".to_string()), 2);
        assert!(matches!(result, Err(CommerceError::ItemNotInCart(_))));
    }

    #[test]
    fn test_name_key_does_not_match_line_with_id() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("A", Money::new(10)).with_id("p1")).unwrap();
        assert!(cart.get(&ItemKey::Name("A".to_string())).is_none());
    }

    #[test]
    fn test_remove_returns_item() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("A", Money::new(10))).unwrap();
        let key = cart.add(NewItem::new("B", Money::new(20))).unwrap().key;

        let removed = cart.remove(&key).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(cart.len(), 1);
        assert!(cart.remove(&key).is_err());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("A", Money::new(10))).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_document_roundtrip() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("Bibit A", Money::new(15000)).with_id("p1").with_image("a.jpg"))
            .unwrap();
        cart.add(NewItem::new("Bibit B", Money::new(2500)).with_quantity(4)).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_document_without_items_is_empty() {
        let cart: Cart = serde_json::from_str("{}").unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_document_duplicates_are_merged() {
        let cart: Cart = serde_json::from_str(
            r#"{"items":[{"name":"A","price":1,"qty":1},{"name":"A","price":1,"qty":2}]}"#,
        )
        .unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }
}
