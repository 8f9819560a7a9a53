//! Presentation layer of the BenihCandi storefront pages.
//!
//! Page state is kept in plain structs so a thin DOM binding (or a test)
//! can drive it:
//!
//! - **Controller**: add/update/remove/clear/checkout events against the
//!   persisted cart, with toasts and delayed navigation
//! - **Badge** and **cart page** rendering
//! - **Scrollspy**, **filter tabs**, **gallery**, **team cards** and page
//!   **effects**
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use benih_cache::MemoryStore;
//! use benih_storefront::prelude::*;
//!
//! let config = StorefrontConfig::default();
//! let logger = config.logger("index.html");
//! let mut page =
//!     StorefrontController::new(config, MemoryStore::new(), RecordingNavigator::new(), logger);
//!
//! page.on_page_load();
//! let button = ButtonData::from_dataset([("name", "Bibit Cabai"), ("price", "15000")]);
//! assert!(page.on_add_to_cart(&button).unwrap());
//! assert_eq!(page.badge().text(), "1");
//!
//! page.tick(Duration::from_millis(1000));
//! assert_eq!(page.navigator().current(), Some("keranjang.html"));
//! ```

pub mod badge;
pub mod config;
pub mod controller;
pub mod effects;
pub mod filter;
pub mod gallery;
pub mod navigation;
pub mod render;
pub mod scrollspy;
pub mod team;
pub mod timers;
pub mod toast;

pub use badge::CartBadge;
pub use config::StorefrontConfig;
pub use controller::{ButtonData, Confirm, StorefrontController};
pub use navigation::{Navigator, RecordingNavigator};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::badge::CartBadge;
    pub use crate::config::StorefrontConfig;
    pub use crate::controller::{ButtonData, Confirm, StorefrontController};
    pub use crate::effects::{header_shadow, stagger_delays, MobileMenu, TypingEffect};
    pub use crate::filter::FilterTabs;
    pub use crate::gallery::{Gallery, ScrollCommand};
    pub use crate::navigation::{Navigator, RecordingNavigator};
    pub use crate::render::{render_cart_page, CartPage, CartSummary};
    pub use crate::scrollspy::{ScrollSpy, SectionPosition};
    pub use crate::team::TeamCards;
    pub use crate::timers::Timers;
    pub use crate::toast::{Toast, ToastKind, ToastTray};
}
