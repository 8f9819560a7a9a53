//! Persistent cart store.
//!
//! The persisted document is the single source of truth. Every mutating
//! call reloads it, applies one change and writes it back, so successive
//! calls observe each other in call order. Writes from outside this page
//! (another tab) are not detected: last write wins.

use std::rc::Rc;

use benih_cache::{Cache, RawStore};
use benih_observability::StructuredLogger;

use crate::cart::{compute_totals, AddOutcome, Cart, CartItem, CartTotals, ItemKey, NewItem};
use crate::error::CommerceError;

/// Storage key of the cart document.
pub const CART_KEY: &str = "benihcandi_cart_v1";

/// Storage key reserved for visitor data. Not read or written by the cart.
pub const USER_KEY: &str = "benihcandi_user_v1";

/// Receives the new cart state after every successful save.
pub trait CartListener {
    /// Called once per save, after the write.
    fn cart_changed(&self, cart: &Cart, totals: &CartTotals);
}

impl<T: CartListener + ?Sized> CartListener for Rc<T> {
    fn cart_changed(&self, cart: &Cart, totals: &CartTotals) {
        (**self).cart_changed(cart, totals)
    }
}

/// How a load resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No document stored yet.
    Missing,
    /// Document decoded.
    Loaded(Cart),
    /// Document unreadable; treated as an empty cart.
    Recovered {
        /// Why the stored document was discarded.
        reason: String,
    },
}

impl LoadOutcome {
    /// The cart this outcome stands for.
    pub fn into_cart(self) -> Cart {
        match self {
            LoadOutcome::Loaded(cart) => cart,
            LoadOutcome::Missing | LoadOutcome::Recovered { .. } => Cart::new(),
        }
    }

    /// Whether a corrupt document was discarded.
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }
}

/// Cart persisted in a key-value store.
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    logger: StructuredLogger,
    listeners: Vec<Box<dyn CartListener>>,
}

impl<S: RawStore> CartStore<S> {
    /// Create a store over `store` using [`CART_KEY`].
    pub fn new(store: S, logger: StructuredLogger) -> Self {
        Self::with_key(store, CART_KEY, logger)
    }

    /// Create a store using a custom document key.
    pub fn with_key(store: S, key: impl Into<String>, logger: StructuredLogger) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
            logger,
            listeners: Vec::new(),
        }
    }

    /// Register a listener notified after every save.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Storage key of the document.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying raw store.
    pub fn raw_store(&self) -> &S {
        self.cache.store()
    }

    /// Read the document, distinguishing absent, decoded and discarded.
    ///
    /// Never fails: read and decode errors are logged and reported as
    /// [`LoadOutcome::Recovered`].
    pub fn load_outcome(&self) -> LoadOutcome {
        let bytes = match self.cache.get_raw(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return LoadOutcome::Missing,
            Err(e) => return self.recovered(e.to_string()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return LoadOutcome::Missing;
        }
        match serde_json::from_slice::<Cart>(&bytes) {
            Ok(cart) => LoadOutcome::Loaded(cart),
            Err(e) => self.recovered(e.to_string()),
        }
    }

    /// Read the cart; an absent or corrupt document yields an empty cart.
    pub fn load(&self) -> Cart {
        self.load_outcome().into_cart()
    }

    /// Overwrite the document with `cart` and notify listeners.
    pub fn save(&self, cart: &Cart) -> Result<CartTotals, CommerceError> {
        self.cache.set(&self.key, cart)?;
        let totals = compute_totals(cart);
        self.logger
            .debug_builder("cart saved")
            .field("key", self.key.as_str())
            .field("lines", cart.len())
            .field("count", totals.count)
            .emit();
        self.notify(cart, &totals);
        Ok(totals)
    }

    /// Notify listeners of the stored cart without writing (page load).
    pub fn refresh(&self) -> CartTotals {
        let cart = self.load();
        let totals = compute_totals(&cart);
        self.notify(&cart, &totals);
        totals
    }

    /// Add a product, merging by identity.
    pub fn add(&self, item: NewItem) -> Result<AddOutcome, CommerceError> {
        let mut cart = self.load();
        let outcome = cart.add(item)?;
        self.save(&cart)?;
        Ok(outcome)
    }

    /// Set a line's quantity. Quantities below 1 are rejected with no write.
    pub fn set_quantity(&self, key: &ItemKey, quantity: i64) -> Result<CartTotals, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let mut cart = self.load();
        cart.set_quantity(key, quantity)?;
        self.save(&cart)
    }

    /// Remove a line, returning it so callers can name it.
    pub fn remove(&self, key: &ItemKey) -> Result<CartItem, CommerceError> {
        let mut cart = self.load();
        let removed = cart.remove(key)?;
        self.save(&cart)?;
        Ok(removed)
    }

    /// Replace the cart with an empty one.
    pub fn clear(&self) -> Result<(), CommerceError> {
        self.save(&Cart::new()).map(|_| ())
    }

    /// Totals of the stored cart.
    pub fn totals(&self) -> CartTotals {
        compute_totals(&self.load())
    }

    fn notify(&self, cart: &Cart, totals: &CartTotals) {
        for listener in &self.listeners {
            listener.cart_changed(cart, totals);
        }
    }

    fn recovered(&self, reason: String) -> LoadOutcome {
        self.logger
            .warn_builder("Failed to parse cart from storage")
            .field("key", self.key.as_str())
            .field("reason", reason.as_str())
            .emit();
        LoadOutcome::Recovered { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use benih_cache::MemoryStore;
    use benih_observability::{LogCapture, LogLevel, PageId};

    use crate::money::Money;

    #[test]
    fn test_storage_keys() {
        assert_eq!(CART_KEY, benih_cache::cache_key!("benihcandi", "cart", "v1"));
        assert_eq!(USER_KEY, benih_cache::cache_key!("benihcandi", "user", "v1"));
    }

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<CartTotals>>,
    }

    impl CartListener for Recorder {
        fn cart_changed(&self, _cart: &Cart, totals: &CartTotals) {
            self.seen.borrow_mut().push(*totals);
        }
    }

    fn logger(capture: &LogCapture) -> StructuredLogger {
        StructuredLogger::new(PageId::new("page_test"))
            .with_component("cart-store")
            .with_capture(capture.clone())
    }

    fn store() -> CartStore<MemoryStore> {
        CartStore::new(MemoryStore::new(), logger(&LogCapture::new()))
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = store();
        assert_eq!(store.load_outcome(), LoadOutcome::Missing);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_recovers_and_logs() {
        let capture = LogCapture::new();
        let store = CartStore::new(MemoryStore::with_entry(CART_KEY, "{oops"), logger(&capture));

        let outcome = store.load_outcome();
        assert!(outcome.is_recovered());
        assert!(store.load().is_empty());

        let warns = capture.at_level(LogLevel::Warn);
        assert_eq!(warns.len(), 2);
        assert_eq!(warns[0].message, "Failed to parse cart from storage");
    }

    #[test]
    fn test_load_wrong_shape_recovers() {
        let store = CartStore::new(
            MemoryStore::with_entry(CART_KEY, r#"{"items":"nope"}"#),
            logger(&LogCapture::new()),
        );
        assert!(store.load_outcome().is_recovered());
    }

    #[test]
    fn test_blank_document_is_missing() {
        let store = CartStore::new(
            MemoryStore::with_entry(CART_KEY, "  "),
            logger(&LogCapture::new()),
        );
        assert_eq!(store.load_outcome(), LoadOutcome::Missing);
    }

    #[test]
    fn test_save_notifies_listeners() {
        let recorder = Rc::new(Recorder::default());
        let mut store = store();
        store.subscribe(Rc::clone(&recorder));

        store.add(NewItem::new("Bibit A", Money::new(15000))).unwrap();
        store.add(NewItem::new("Bibit A", Money::new(15000))).unwrap();

        let seen = recorder.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].count, 2);
        assert_eq!(seen[1].total, Money::new(30000));
    }

    #[test]
    fn test_rejected_quantity_does_not_write_or_notify() {
        let recorder = Rc::new(Recorder::default());
        let mut store = store();
        store.subscribe(Rc::clone(&recorder));
        let key = store.add(NewItem::new("A", Money::new(10))).unwrap().key;
        let before = store.raw_store().get(CART_KEY).unwrap();

        assert!(matches!(
            store.set_quantity(&key, 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert_eq!(store.raw_store().get(CART_KEY).unwrap(), before);
        assert_eq!(recorder.seen.borrow().len(), 1);
    }

    #[test]
    fn test_refresh_notifies_without_writing() {
        let recorder = Rc::new(Recorder::default());
        let mut store = store();
        store.subscribe(Rc::clone(&recorder));

        let totals = store.refresh();
        assert!(totals.is_empty());
        assert_eq!(recorder.seen.borrow().len(), 1);
        assert!(store.raw_store().is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let store = store();
        let key = store.add(NewItem::new("A", Money::new(10))).unwrap().key;
        store.add(NewItem::new("B", Money::new(20))).unwrap();

        let removed = store.remove(&key).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(store.totals().count, 1);

        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert_eq!(store.load_outcome(), LoadOutcome::Loaded(Cart::new()));
    }

    #[test]
    fn test_custom_key() {
        let store = CartStore::with_key(MemoryStore::new(), "cart_test", logger(&LogCapture::new()));
        store.add(NewItem::new("A", Money::new(10))).unwrap();
        assert!(store.raw_store().exists("cart_test").unwrap());
        assert!(!store.raw_store().exists(CART_KEY).unwrap());
    }
}
