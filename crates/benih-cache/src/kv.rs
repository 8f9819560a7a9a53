//! Key-value store wrapper with automatic serialization.

use crate::{CacheError, RawStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`RawStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: RawStore> Cache<S> {
    /// Wrap a raw store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use benih_cache::{Cache, MemoryStore};
    /// let cache = Cache::new(MemoryStore::new());
    /// ```
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// bytes are not a valid `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("benihcandi_cart_v1")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the raw stored bytes, leaving decoding to the caller.
    ///
    /// Callers that recover from corrupt documents use this to tell a
    /// missing key apart from undecodable content.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("benihcandi_cart_v1", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = benih_cache::cache_key!("benihcandi", "cart", "v1");
/// assert_eq!(key, "benihcandi_cart_v1");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('_');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let doc: Option<Doc> = cache.get("missing").unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStore::new());
        let doc = Doc {
            items: vec!["Bibit A".to_string()],
        };
        cache.set("doc", &doc).unwrap();
        assert_eq!(cache.get::<Doc>("doc").unwrap(), Some(doc));
        assert!(cache.exists("doc").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["doc".to_string()]);
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let cache = Cache::new(MemoryStore::with_entry("doc", "{not json"));
        let result = cache.get::<Doc>("doc");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
        assert_eq!(cache.get_raw("doc").unwrap(), Some(b"{not json".to_vec()));
    }

    #[test]
    fn test_delete() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("doc", &Doc { items: vec![] }).unwrap();
        cache.delete("doc").unwrap();
        assert!(!cache.exists("doc").unwrap());
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("benihcandi", "user", "v1"), "benihcandi_user_v1");
        assert_eq!(cache_key!("cart", 42), "cart_42");
    }
}
