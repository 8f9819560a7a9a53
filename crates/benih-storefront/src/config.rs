//! Storefront configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use benih_commerce::store::{CART_KEY, USER_KEY};
use benih_observability::{LogFormat, LogLevel, PageId, StructuredLogger};
use serde::{Deserialize, Serialize};

/// Storefront configuration file.
///
/// Every field has a default matching the live site, so an empty file is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Storage key of the cart document.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Storage key reserved for visitor data.
    #[serde(default = "default_user_key")]
    pub user_key: String,

    /// Cart page the visitor is sent to after adding a product.
    #[serde(default = "default_cart_page")]
    pub cart_page: String,

    /// Link target of the empty-cart call to action.
    #[serde(default = "default_shop_anchor")]
    pub shop_anchor: String,

    /// Delay between the add confirmation and the navigation to the cart.
    #[serde(default = "default_navigate_delay_ms")]
    pub navigate_delay_ms: u64,

    /// How long a toast stays visible.
    #[serde(default = "default_toast_timeout_ms")]
    pub toast_timeout_ms: u64,

    /// Image shown for cart lines without one.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,

    #[serde(default)]
    pub scrollspy: ScrollSpyConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub effects: EffectsConfig,

    #[serde(default)]
    pub team: TeamConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    pub fn navigate_delay(&self) -> Duration {
        Duration::from_millis(self.navigate_delay_ms)
    }

    pub fn toast_timeout(&self) -> Duration {
        Duration::from_millis(self.toast_timeout_ms)
    }

    /// Logger for one page load, configured from `[log]`.
    pub fn logger(&self, page: &str) -> StructuredLogger {
        StructuredLogger::new(PageId::generate())
            .with_page(page)
            .with_min_level(self.log.level)
            .with_format(self.log.format)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_key: default_cart_key(),
            user_key: default_user_key(),
            cart_page: default_cart_page(),
            shop_anchor: default_shop_anchor(),
            navigate_delay_ms: default_navigate_delay_ms(),
            toast_timeout_ms: default_toast_timeout_ms(),
            fallback_image: default_fallback_image(),
            scrollspy: ScrollSpyConfig::default(),
            gallery: GalleryConfig::default(),
            effects: EffectsConfig::default(),
            team: TeamConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn default_cart_key() -> String {
    CART_KEY.to_string()
}

fn default_user_key() -> String {
    USER_KEY.to_string()
}

fn default_cart_page() -> String {
    "keranjang.html".to_string()
}

fn default_shop_anchor() -> String {
    "index.html#produk".to_string()
}

fn default_navigate_delay_ms() -> u64 {
    1000
}

fn default_toast_timeout_ms() -> u64 {
    3000
}

fn default_fallback_image() -> String {
    "images/produk/produk1.jpg".to_string()
}

/// Scrollspy settings for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSpyConfig {
    /// Section ids in document order.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,

    /// Added to the scroll position before comparing section tops.
    #[serde(default = "default_spy_offset")]
    pub offset: f64,

    /// Height of the fixed navbar, subtracted from smooth-scroll targets.
    #[serde(default = "default_header_offset")]
    pub header_offset: f64,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            offset: default_spy_offset(),
            header_offset: default_header_offset(),
        }
    }
}

fn default_sections() -> Vec<String> {
    vec![
        "beranda".to_string(),
        "artikel".to_string(),
        "produk".to_string(),
    ]
}

fn default_spy_offset() -> f64 {
    150.0
}

fn default_header_offset() -> f64 {
    80.0
}

/// Image gallery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Gap between items, matching the stylesheet.
    #[serde(default = "default_gap")]
    pub gap: f64,

    /// Item width used when the size control holds no number.
    #[serde(default = "default_item_width")]
    pub default_item_width: f64,

    /// Delay before re-snapping after a resize.
    #[serde(default = "default_resize_snap_ms")]
    pub resize_snap_ms: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            gap: default_gap(),
            default_item_width: default_item_width(),
            resize_snap_ms: default_resize_snap_ms(),
        }
    }
}

fn default_gap() -> f64 {
    14.0
}

fn default_item_width() -> f64 {
    300.0
}

fn default_resize_snap_ms() -> u64 {
    120
}

/// Page-load animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Time between typed characters of the page title.
    #[serde(default = "default_typing_interval_ms")]
    pub typing_interval_ms: u64,

    /// Delay between consecutive fade-ins.
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,

    /// Scroll distance after which the header casts a shadow.
    #[serde(default = "default_header_shadow_threshold")]
    pub header_shadow_threshold: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: default_typing_interval_ms(),
            stagger_ms: default_stagger_ms(),
            header_shadow_threshold: default_header_shadow_threshold(),
        }
    }
}

fn default_typing_interval_ms() -> u64 {
    70
}

fn default_stagger_ms() -> u64 {
    150
}

fn default_header_shadow_threshold() -> f64 {
    20.0
}

/// Team page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Profile link of each member card, in card order.
    #[serde(default = "default_team_links")]
    pub links: Vec<String>,

    /// Card background while hovered.
    #[serde(default = "default_hover_background")]
    pub hover_background: String,

    /// Card background otherwise.
    #[serde(default = "default_card_background")]
    pub background: String,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            links: default_team_links(),
            hover_background: default_hover_background(),
            background: default_card_background(),
        }
    }
}

fn default_team_links() -> Vec<String> {
    [
        "teguh-santoso",
        "rafipratama",
        "rizkyananda",
        "dewilestari",
        "fajarhidayat",
        "putriamelia",
    ]
    .iter()
    .map(|user| format!("https://github.com/{}", user))
    .collect()
}

fn default_hover_background() -> String {
    "#eafaf1".to_string()
}

fn default_card_background() -> String {
    "#fff".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}
