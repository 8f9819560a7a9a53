//! Cart line items and their identity.
//!
//! The persisted document is written by hand-edited pages and older script
//! versions, so decoding is lenient: a bad price reads as 0, a bad
//! quantity as 1, and a blank id as no id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ids::ProductId;
use crate::money::Money;

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id, if the page supplied one.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<ProductId>,
    /// Display name; identity fallback when `id` is absent.
    pub name: String,
    /// Unit price.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Money,
    /// Quantity, always at least 1.
    #[serde(rename = "qty", default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    /// Image reference, empty when none.
    #[serde(rename = "img", default, deserialize_with = "lenient_image")]
    pub image: String,
}

impl CartItem {
    /// Identity of this line.
    pub fn key(&self) -> ItemKey {
        match &self.id {
            Some(id) => ItemKey::Id(id.clone()),
            None => ItemKey::Name(self.name.clone()),
        }
    }

    /// Whether this line answers to `key`.
    pub fn matches(&self, key: &ItemKey) -> bool {
        match key {
            ItemKey::Id(id) => self.id.as_ref() == Some(id),
            ItemKey::Name(name) => self.id.is_none() && &self.name == name,
        }
    }

    /// `price * quantity`, saturating.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Stable address of a cart line: the product id if present, else the name.
///
/// At most one line per key exists in a cart, so update and remove address
/// lines by key instead of by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// Line identified by product id.
    Id(ProductId),
    /// Line without an id, identified by name.
    Name(String),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Id(id) => write!(f, "id:{}", id),
            ItemKey::Name(name) => write!(f, "name:{}", name),
        }
    }
}

impl FromStr for ItemKey {
    type Err = String;

    /// Parse the `id:<id>` / `name:<name>` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix("id:") {
            if id.is_empty() {
                return Err("empty item id".to_string());
            }
            return Ok(ItemKey::Id(ProductId::new(id)));
        }
        if let Some(name) = s.strip_prefix("name:") {
            return Ok(ItemKey::Name(name.to_string()));
        }
        Err(format!("unrecognized item key: {}", s))
    }
}

/// A product about to be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Money,
    /// Defaults to 1 when absent or zero.
    pub quantity: Option<u32>,
    pub image: Option<String>,
}

impl NewItem {
    /// A product with a name and unit price, quantity 1.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            quantity: None,
            image: None,
        }
    }

    /// Set the product id. Blank ids are ignored.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = if id.trim().is_empty() {
            None
        } else {
            Some(ProductId::new(id))
        };
        self
    }

    /// Set the quantity to add.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Quantity actually added.
    pub fn effective_quantity(&self) -> u32 {
        match self.quantity {
            Some(q) if q >= 1 => q,
            _ => 1,
        }
    }

    pub(crate) fn into_item(self) -> CartItem {
        let quantity = self.effective_quantity();
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            quantity,
            image: self.image.unwrap_or_default(),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ProductId>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(ProductId::new(s)),
        Some(Value::Number(n)) => Some(ProductId::new(n.to_string())),
        _ => None,
    })
}

fn lenient_price<'de, D: Deserializer<'de>>(d: D) -> Result<Money, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    let exact = match &value {
        Some(Value::Number(n)) => n.as_i64().map(Money::new),
        _ => None,
    };
    Ok(exact
        .or_else(|| value.as_ref().and_then(number_of).and_then(Money::from_decimal))
        .filter(|m| !m.is_negative())
        .unwrap_or_default())
}

fn lenient_quantity<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .as_ref()
        .and_then(number_of)
        .filter(|q| q.is_finite() && *q >= 1.0 && *q <= f64::from(u32::MAX))
        .map(|q| q.trunc() as u32)
        .unwrap_or(1))
}

fn lenient_image<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}
