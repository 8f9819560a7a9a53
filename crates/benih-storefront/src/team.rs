//! Team member cards on the "Tim" page.

use crate::config::TeamConfig;

/// Hover state and profile links of the member cards.
///
/// Cards are addressed by their position on the page. The n-th card links
/// to the n-th configured profile; cards past the end of the list have no
/// link and stay inert.
#[derive(Debug, Clone)]
pub struct TeamCards {
    links: Vec<String>,
    hovered: Vec<bool>,
    hover_background: String,
    background: String,
}

impl TeamCards {
    /// State for `card_count` cards, none hovered.
    pub fn new(card_count: usize, config: &TeamConfig) -> Self {
        Self {
            links: config.links.clone(),
            hovered: vec![false; card_count],
            hover_background: config.hover_background.clone(),
            background: config.background.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.hovered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hovered.is_empty()
    }

    /// Profile opened when card `index` is clicked.
    pub fn link_for(&self, index: usize) -> Option<&str> {
        if index >= self.len() {
            return None;
        }
        self.links
            .get(index)
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
    }

    /// Pointer entered card `index`.
    pub fn hover(&mut self, index: usize) {
        if let Some(h) = self.hovered.get_mut(index) {
            *h = true;
        }
    }

    /// Pointer left card `index`.
    pub fn leave(&mut self, index: usize) {
        if let Some(h) = self.hovered.get_mut(index) {
            *h = false;
        }
    }

    /// Background color of card `index`, `None` if there is no such card.
    pub fn background(&self, index: usize) -> Option<&str> {
        self.hovered.get(index).map(|&hovered| {
            if hovered {
                self.hover_background.as_str()
            } else {
                self.background.as_str()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_link_by_position() {
        let cards = TeamCards::new(7, &TeamConfig::default());
        assert_eq!(cards.link_for(0), Some("https://github.com/teguh-santoso"));
        assert_eq!(cards.link_for(5), Some("https://github.com/putriamelia"));
        // more cards than links
        assert_eq!(cards.link_for(6), None);
        assert_eq!(cards.link_for(7), None);
    }

    #[test]
    fn test_blank_links_are_inert() {
        let config = TeamConfig {
            links: vec![" ".to_string(), "https://github.com/rafipratama".to_string()],
            ..TeamConfig::default()
        };
        let cards = TeamCards::new(2, &config);
        assert_eq!(cards.link_for(0), None);
        assert_eq!(cards.link_for(1), Some("https://github.com/rafipratama"));
    }

    #[test]
    fn test_hover_and_leave() {
        let mut cards = TeamCards::new(3, &TeamConfig::default());
        assert_eq!(cards.background(1), Some("#fff"));

        cards.hover(1);
        assert_eq!(cards.background(1), Some("#eafaf1"));
        assert_eq!(cards.background(0), Some("#fff"));

        cards.leave(1);
        assert_eq!(cards.background(1), Some("#fff"));

        cards.hover(9);
        assert_eq!(cards.background(9), None);
    }
}
