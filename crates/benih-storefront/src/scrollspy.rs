//! Active-section tracking for the landing page navbar.

use crate::config::ScrollSpyConfig;

/// Document position of a section element.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPosition {
    pub id: String,
    pub top: f64,
}

impl SectionPosition {
    /// Section `id` whose top edge is at `top` pixels from the document top.
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// Decides which navbar link is active for a scroll position.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<String>,
    offset: f64,
    header_offset: f64,
}

impl ScrollSpy {
    /// Spy over the configured section ids, in navbar order.
    pub fn new(config: &ScrollSpyConfig) -> Self {
        Self {
            sections: config.sections.clone(),
            offset: config.offset,
            header_offset: config.header_offset,
        }
    }

    /// Id of the active section.
    ///
    /// The last configured section whose top is at or above
    /// `scroll_y + offset` wins. Sections missing from `present` are
    /// skipped; with none reached the first configured section is active.
    pub fn active(&self, scroll_y: f64, present: &[SectionPosition]) -> Option<String> {
        let marker = scroll_y + self.offset;
        self.sections
            .iter()
            .rev()
            .find(|id| {
                present
                    .iter()
                    .any(|p| &p.id == *id && p.top <= marker)
            })
            .or_else(|| self.sections.first())
            .cloned()
    }

    /// Which of `hrefs` should carry the `active` class.
    pub fn link_states(&self, active: Option<&str>, hrefs: &[&str]) -> Vec<bool> {
        hrefs
            .iter()
            .map(|href| match active {
                Some(id) => href.strip_prefix('#') == Some(id),
                None => false,
            })
            .collect()
    }

    /// Scroll target for an in-page anchor, clearing the fixed navbar.
    pub fn smooth_scroll_target(&self, element_top: f64, page_y_offset: f64) -> f64 {
        (element_top + page_y_offset - self.header_offset).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionPosition> {
        vec![
            SectionPosition::new("beranda", 0.0),
            SectionPosition::new("artikel", 800.0),
            SectionPosition::new("produk", 1600.0),
        ]
    }

    #[test]
    fn test_active_section() {
        let spy = ScrollSpy::new(&ScrollSpyConfig::default());
        let present = sections();

        assert_eq!(spy.active(0.0, &present).as_deref(), Some("beranda"));
        assert_eq!(spy.active(649.0, &present).as_deref(), Some("beranda"));
        assert_eq!(spy.active(650.0, &present).as_deref(), Some("artikel"));
        assert_eq!(spy.active(5000.0, &present).as_deref(), Some("produk"));
    }

    #[test]
    fn test_missing_sections_fall_back_to_first() {
        let spy = ScrollSpy::new(&ScrollSpyConfig::default());
        assert_eq!(spy.active(1000.0, &[]).as_deref(), Some("beranda"));

        let only_produk = [SectionPosition::new("produk", 400.0)];
        assert_eq!(spy.active(0.0, &only_produk).as_deref(), Some("beranda"));
        assert_eq!(spy.active(300.0, &only_produk).as_deref(), Some("produk"));
    }

    #[test]
    fn test_link_states() {
        let spy = ScrollSpy::new(&ScrollSpyConfig::default());
        let hrefs = ["#beranda", "#artikel", "keranjang.html"];
        assert_eq!(
            spy.link_states(Some("artikel"), &hrefs),
            vec![false, true, false]
        );
        assert_eq!(spy.link_states(None, &hrefs), vec![false, false, false]);
    }

    #[test]
    fn test_smooth_scroll_target() {
        let spy = ScrollSpy::new(&ScrollSpyConfig::default());
        assert_eq!(spy.smooth_scroll_target(500.0, 100.0), 520.0);
        assert_eq!(spy.smooth_scroll_target(10.0, 0.0), 0.0);
    }
}
