//! Category filter for the product listing.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Filter value that shows every product.
pub const FILTER_ALL: &str = "all";

/// A product as listed on the shop page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    /// Display name.
    pub name: String,
    /// Category slug (the card's `data-category`).
    pub category: String,
}

impl ProductCard {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// The active filter tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Show everything.
    #[default]
    All,
    /// Show one category.
    Category(String),
}

impl CategoryFilter {
    /// Create a category filter.
    pub fn category(slug: impl Into<String>) -> Self {
        CategoryFilter::Category(slug.into())
    }

    /// Whether `card` is shown under this filter. Category match is exact.
    pub fn matches(&self, card: &ProductCard) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(slug) => &card.category == slug,
        }
    }

    /// Cards shown under this filter, in listing order.
    pub fn visible<'a>(&self, cards: &'a [ProductCard]) -> Vec<&'a ProductCard> {
        cards.iter().filter(|c| self.matches(c)).collect()
    }

    /// The `data-filter` value of this tab.
    pub fn as_attr(&self) -> &str {
        match self {
            CategoryFilter::All => FILTER_ALL,
            CategoryFilter::Category(slug) => slug,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    /// Parse a tab's `data-filter` value; `"all"` selects everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == FILTER_ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(s.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<ProductCard> {
        vec![
            ProductCard::new("Cabai Rawit", "sayur"),
            ProductCard::new("Mangga", "buah"),
            ProductCard::new("Tomat", "sayur"),
        ]
    }

    #[test]
    fn test_all_shows_everything() {
        let cards = cards();
        assert_eq!(CategoryFilter::All.visible(&cards).len(), 3);
    }

    #[test]
    fn test_category_filter() {
        let cards = cards();
        let names: Vec<&str> = CategoryFilter::category("sayur")
            .visible(&cards)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Cabai Rawit", "Tomat"]);
    }

    #[test]
    fn test_unknown_category_shows_nothing() {
        let cards = cards();
        assert!(CategoryFilter::category("bunga").visible(&cards).is_empty());
    }

    #[test]
    fn test_parse_attr() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        let buah: CategoryFilter = "buah".parse().unwrap();
        assert_eq!(buah, CategoryFilter::category("buah"));
        assert_eq!(buah.as_attr(), "buah");
    }
}
