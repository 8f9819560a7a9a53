//! Product category tabs.

use benih_commerce::catalog::{CategoryFilter, ProductCard};

/// State of the category tab bar.
#[derive(Debug, Clone, Default)]
pub struct FilterTabs {
    selected: CategoryFilter,
}

impl FilterTabs {
    /// Tabs with "all" selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the tab with `data-filter` value `attr`, returning the CSS
    /// `display` value of every card in order.
    pub fn select(&mut self, attr: &str, cards: &[ProductCard]) -> Vec<&'static str> {
        self.selected = attr.parse().unwrap_or_default();
        cards
            .iter()
            .map(|card| {
                if self.selected.matches(card) {
                    "flex"
                } else {
                    "none"
                }
            })
            .collect()
    }

    /// Category of the highlighted tab.
    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    /// Whether the tab with `data-filter` value `attr` is highlighted.
    pub fn is_active(&self, attr: &str) -> bool {
        self.selected.as_attr() == attr
    }
}
