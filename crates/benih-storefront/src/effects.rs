//! Page-load animations and small header behaviors.

use std::time::Duration;

use crate::config::EffectsConfig;

/// CSS `box-shadow` of the scrolled header.
pub const HEADER_SHADOW: &str = "0 2px 8px rgba(0,0,0,0.15)";

/// Class toggled on the navbar by the hamburger button.
pub const NAV_OPEN_CLASS: &str = "nav-open";

/// Types a title one character per tick.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    chars: Vec<char>,
    shown: usize,
    interval: Duration,
}

impl TypingEffect {
    /// Effect that will type out `text`, starting empty.
    pub fn new(text: &str, config: &EffectsConfig) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
            interval: Duration::from_millis(config.typing_interval_ms),
        }
    }

    /// Time between characters.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Text after `elapsed` time since the effect started.
    pub fn frame_at(&self, elapsed: Duration) -> String {
        let ticks = match self.interval.as_millis() {
            0 => self.chars.len() as u128,
            ms => elapsed.as_millis() / ms,
        };
        let n = ticks.min(self.chars.len() as u128) as usize;
        self.chars[..n].iter().collect()
    }

    /// Show one more character. Returns the current text.
    pub fn step(&mut self) -> String {
        if self.shown < self.chars.len() {
            self.shown += 1;
        }
        self.text()
    }

    /// Currently shown text.
    pub fn text(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    /// Whether the whole text is shown.
    pub fn is_done(&self) -> bool {
        self.shown == self.chars.len()
    }
}

/// Header `box-shadow` for a scroll position.
pub fn header_shadow(scroll_y: f64, config: &EffectsConfig) -> &'static str {
    if scroll_y > config.header_shadow_threshold {
        HEADER_SHADOW
    } else {
        "none"
    }
}

/// Fade-in delay of each of `count` elements.
pub fn stagger_delays(count: usize, config: &EffectsConfig) -> Vec<Duration> {
    (0..count as u64)
        .map(|i| Duration::from_millis(i.saturating_mul(config.stagger_ms)))
        .collect()
}

/// Hamburger menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hamburger clicked. Returns whether the menu is now open.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Navbar class list contribution.
    pub fn class(&self) -> Option<&'static str> {
        self.open.then_some(NAV_OPEN_CLASS)
    }
}
