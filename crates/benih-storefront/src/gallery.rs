//! Horizontally scrolling image gallery.
//!
//! Tracks the scroll position the way the browser would after each command
//! and returns the [`ScrollCommand`] the page should apply. Positions are
//! clamped to the scrollable range.

use std::time::Duration;

use crate::config::GalleryConfig;
use crate::timers::Timers;

/// Horizontal extent of one gallery item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub left: f64,
    pub width: f64,
}

impl ItemGeometry {
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// A scroll the page should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub left: f64,
    /// Smooth scrolling; drags scroll immediately.
    pub smooth: bool,
}

#[derive(Debug, Clone, Copy)]
struct DragStart {
    x: f64,
    scroll_left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snap;

/// Gallery state.
#[derive(Debug)]
pub struct Gallery {
    gap: f64,
    default_item_width: f64,
    resize_snap: Duration,
    item_width: f64,
    item_count: usize,
    viewport_width: f64,
    offset_left: f64,
    scroll_left: f64,
    drag: Option<DragStart>,
    snaps: Timers<Snap>,
}

impl Gallery {
    /// Empty gallery at the configured default item width.
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            gap: config.gap,
            default_item_width: config.default_item_width,
            resize_snap: Duration::from_millis(config.resize_snap_ms),
            item_width: config.default_item_width,
            item_count: 0,
            viewport_width: 0.0,
            offset_left: 0.0,
            scroll_left: 0.0,
            drag: None,
            snaps: Timers::new(),
        }
    }

    /// Visible width and page offset of the gallery element.
    pub fn set_viewport(&mut self, width: f64, offset_left: f64) {
        self.viewport_width = width.max(0.0);
        self.offset_left = offset_left;
        self.scroll_left = self.clamp(self.scroll_left);
    }

    /// Number of `.item` children. Items are laid out at the current width
    /// and gap.
    pub fn set_items(&mut self, count: usize) {
        self.item_count = count;
        self.scroll_left = self.clamp(self.scroll_left);
    }

    /// Apply the size control's value. Non-numeric or non-positive input
    /// falls back to the default width.
    pub fn set_item_width(&mut self, raw: &str) {
        self.item_width = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(self.default_item_width);
        self.scroll_left = self.clamp(self.scroll_left);
    }

    /// Current item width in pixels.
    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    /// Value of the `--item-w` custom property.
    pub fn item_width_css(&self) -> String {
        format!("{}px", self.item_width)
    }

    /// Current horizontal scroll offset.
    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    /// Whether the `dragging` class is set.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Item positions in scroll coordinates.
    pub fn items(&self) -> Vec<ItemGeometry> {
        (0..self.item_count)
            .map(|i| ItemGeometry {
                left: i as f64 * (self.item_width + self.gap),
                width: self.item_width,
            })
            .collect()
    }

    /// Total scrollable content width.
    pub fn scroll_width(&self) -> f64 {
        match self.item_count {
            0 => 0.0,
            n => n as f64 * self.item_width + (n - 1) as f64 * self.gap,
        }
    }

    /// Scroll one item forward (`1`) or back (`-1`).
    pub fn scroll_by_direction(&mut self, direction: i32) -> ScrollCommand {
        let step = f64::from(direction.signum()) * (self.item_width + self.gap);
        self.scroll_to(self.scroll_left + step, true)
    }

    /// Pointer down at `page_x`.
    pub fn press(&mut self, page_x: f64) {
        self.drag = Some(DragStart {
            x: page_x - self.offset_left,
            scroll_left: self.scroll_left,
        });
    }

    /// Pointer moved to `page_x`. Ignored unless pressed.
    pub fn drag(&mut self, page_x: f64) -> Option<ScrollCommand> {
        let start = self.drag?;
        let walk = page_x - self.offset_left - start.x;
        Some(self.scroll_to(start.scroll_left - walk, false))
    }

    /// Pointer released or left the gallery; snaps when a drag was active.
    pub fn release(&mut self) -> Option<ScrollCommand> {
        self.drag.take()?;
        self.snap_to_closest()
    }

    /// Center the item closest to the viewport center.
    pub fn snap_to_closest(&mut self) -> Option<ScrollCommand> {
        let center = self.scroll_left + self.viewport_width / 2.0;
        let closest = self
            .items()
            .into_iter()
            .min_by(|a, b| {
                let da = (a.center() - center).abs();
                let db = (b.center() - center).abs();
                da.total_cmp(&db)
            })?;
        Some(self.scroll_to(closest.center() - self.viewport_width / 2.0, true))
    }

    /// Keyboard navigation. Returns `None` for keys the gallery ignores.
    pub fn key(&mut self, key: &str) -> Option<ScrollCommand> {
        match key {
            "ArrowRight" => Some(self.scroll_by_direction(1)),
            "ArrowLeft" => Some(self.scroll_by_direction(-1)),
            "Home" => Some(self.scroll_to(0.0, true)),
            "End" => Some(self.scroll_to(self.scroll_width(), true)),
            _ => None,
        }
    }

    /// Double-click inside the gallery. `image_src` is the `src` of the
    /// image under the pointer, if any; returns the URL to open in a new tab.
    pub fn double_click(&self, image_src: Option<&str>) -> Option<String> {
        image_src
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(str::to_string)
    }

    /// Window resized at `now`; a snap runs after the configured delay.
    ///
    /// Returns the snap of an earlier resize if it was already due.
    pub fn on_resize(&mut self, now: Duration) -> Option<ScrollCommand> {
        let due = self.tick(now);
        self.snaps.schedule(self.resize_snap, Snap);
        due
    }

    /// Advance time, running a due snap.
    pub fn tick(&mut self, now: Duration) -> Option<ScrollCommand> {
        let due = self.snaps.advance_to(now);
        due.last()?;
        self.snap_to_closest()
    }

    fn scroll_to(&mut self, left: f64, smooth: bool) -> ScrollCommand {
        self.scroll_left = self.clamp(left);
        ScrollCommand {
            left: self.scroll_left,
            smooth,
        }
    }

    fn clamp(&self, left: f64) -> f64 {
        let max = (self.scroll_width() - self.viewport_width).max(0.0);
        left.clamp(0.0, max)
    }
}
