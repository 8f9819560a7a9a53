//! Cart event handling for storefront pages.
//!
//! The controller owns the page's presentation state (badge, toasts, the
//! rendered cart surface, pending timers) and turns UI events into cart
//! store calls. Invalid input never reaches the store: it becomes an error
//! toast and the cart is left as it was.

use std::rc::Rc;
use std::time::Duration;

use benih_cache::RawStore;
use benih_commerce::cart::{ItemKey, NewItem};
use benih_commerce::checkout;
use benih_commerce::money::Money;
use benih_commerce::store::CartStore;
use benih_commerce::CommerceError;
use benih_observability::StructuredLogger;

use crate::badge::CartBadge;
use crate::config::StorefrontConfig;
use crate::navigation::Navigator;
use crate::render::{render_cart_page, CartPage};
use crate::timers::Timers;
use crate::toast::{Toast, ToastId, ToastTray};

pub const MSG_INCOMPLETE_PRODUCT: &str = "Informasi produk tidak lengkap";
pub const MSG_INVALID_QUANTITY: &str = "Jumlah minimal 1";
pub const MSG_QUANTITY_TOO_LARGE: &str = "Jumlah melebihi batas";
pub const MSG_CLEAR_PROMPT: &str = "Apakah Anda yakin ingin mengosongkan keranjang?";
pub const MSG_CLEARED: &str = "Keranjang dikosongkan";
pub const MSG_EMPTY_CHECKOUT: &str = "Keranjang Anda kosong";
pub const MSG_CHECKOUT: &str = "Melanjutkan ke pembayaran... (Fitur ini masih simulasi)";
pub const MSG_STORAGE_FAILED: &str = "Gagal menyimpan keranjang";
pub const MSG_TERMS_LOADED: &str = "Halaman Syarat dan Ketentuan berhasil dimuat.";

/// Asks the visitor to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Data attributes of an add-to-cart button.
///
/// `name` and `price` are required; `id` and `img` are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonData {
    pub name: Option<String>,
    pub price: Option<String>,
    pub id: Option<String>,
    pub img: Option<String>,
}

impl ButtonData {
    /// Build from `(attribute, value)` pairs of the element's dataset.
    pub fn from_dataset<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut data = Self::default();
        for (key, value) in attrs {
            let slot = match key {
                "name" => &mut data.name,
                "price" => &mut data.price,
                "id" => &mut data.id,
                "img" => &mut data.img,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        data
    }

    /// Validate into a product with quantity 1.
    pub fn to_new_item(&self) -> Result<NewItem, CommerceError> {
        let name = non_blank(&self.name).ok_or(CommerceError::MissingField("name"))?;
        let raw_price = non_blank(&self.price).ok_or(CommerceError::MissingField("price"))?;
        let price = raw_price
            .parse::<f64>()
            .ok()
            .and_then(Money::from_decimal)
            .filter(|p| !p.is_negative())
            .ok_or_else(|| CommerceError::InvalidPrice(raw_price.to_string()))?;

        let mut item = NewItem::new(name, price).with_quantity(1);
        if let Some(id) = non_blank(&self.id) {
            item = item.with_id(id);
        }
        if let Some(img) = non_blank(&self.img) {
            item = item.with_image(img);
        }
        Ok(item)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Deferred page work.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageTask {
    DismissToast(ToastId),
    Navigate(String),
}

/// Cart event handling for one page.
pub struct StorefrontController<S, N> {
    config: StorefrontConfig,
    store: CartStore<S>,
    badge: Rc<CartBadge>,
    toasts: ToastTray,
    timers: Timers<PageTask>,
    navigator: N,
    logger: StructuredLogger,
    cart_surface: bool,
    rendered: Option<CartPage>,
}

impl<S: RawStore, N: Navigator> StorefrontController<S, N> {
    /// Create a controller for a page without a cart surface.
    pub fn new(
        config: StorefrontConfig,
        raw_store: S,
        navigator: N,
        logger: StructuredLogger,
    ) -> Self {
        let badge = Rc::new(CartBadge::new());
        let mut store = CartStore::with_key(
            raw_store,
            config.cart_key.clone(),
            logger.clone().with_component("cart-store"),
        );
        store.subscribe(Rc::clone(&badge));

        Self {
            config,
            store,
            badge,
            toasts: ToastTray::new(),
            timers: Timers::new(),
            navigator,
            logger: logger.with_component("storefront"),
            cart_surface: false,
            rendered: None,
        }
    }

    /// Mark the page as having a cart surface to render.
    pub fn with_cart_surface(mut self) -> Self {
        self.cart_surface = true;
        self
    }

    /// Page finished loading: refresh the badge and render the cart.
    pub fn on_page_load(&mut self) {
        let totals = self.store.refresh();
        self.logger
            .debug_builder("page loaded")
            .field("cart_count", totals.count)
            .emit();
        self.rerender();
    }

    /// Terms and conditions page finished loading.
    pub fn on_terms_page_load(&mut self) {
        self.on_page_load();
        self.logger.info_builder(MSG_TERMS_LOADED).emit();
    }

    /// The back button was clicked.
    pub fn on_back(&mut self) {
        self.logger.debug_builder("going back").emit();
        self.navigator.back();
    }

    /// Open `url` in a new tab, e.g. a gallery image or a team profile.
    /// Blank URLs are ignored.
    pub fn open_in_new_tab(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.navigator.open_in_new_tab(url);
        true
    }

    /// An add-to-cart button was clicked.
    ///
    /// Returns `Ok(true)` when the product was added.
    pub fn on_add_to_cart(&mut self, data: &ButtonData) -> Result<bool, CommerceError> {
        let item = match data.to_new_item() {
            Ok(item) => item,
            Err(e) => {
                self.logger
                    .warn_builder("rejected add to cart")
                    .field("reason", e.to_string())
                    .emit();
                self.toast(Toast::error(MSG_INCOMPLETE_PRODUCT));
                return Ok(false);
            }
        };

        let outcome = self.guard(|store| store.add(item))?;
        let Some(outcome) = outcome else {
            return Ok(false);
        };

        self.toast(Toast::success(format!(
            "{} ditambahkan ke keranjang",
            outcome.name
        )));
        let target = self.config.cart_page.clone();
        self.timers
            .schedule(self.config.navigate_delay(), PageTask::Navigate(target));
        self.rerender();
        Ok(true)
    }

    /// A quantity input changed to `raw`.
    ///
    /// Values that are not numbers or are below 1 are rejected.
    pub fn on_quantity_change(&mut self, key: &ItemKey, raw: &str) -> Result<bool, CommerceError> {
        let quantity = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite())
            .map(|q| q.trunc() as i64);
        let Some(quantity) = quantity.filter(|q| *q >= 1) else {
            self.toast(Toast::error(MSG_INVALID_QUANTITY));
            self.rerender();
            return Ok(false);
        };

        let changed = self.guard(|store| store.set_quantity(key, quantity))?;
        self.rerender();
        Ok(changed.is_some())
    }

    /// A remove button was clicked.
    pub fn on_remove(&mut self, key: &ItemKey) -> Result<bool, CommerceError> {
        let removed = self.guard(|store| store.remove(key))?;
        if let Some(item) = &removed {
            self.toast(Toast::success(format!(
                "{} dihapus dari keranjang",
                item.name
            )));
        }
        self.rerender();
        Ok(removed.is_some())
    }

    /// The clear-cart button was clicked.
    pub fn on_clear(&mut self, confirm: &dyn Confirm) -> Result<bool, CommerceError> {
        if !confirm.confirm(MSG_CLEAR_PROMPT) {
            return Ok(false);
        }
        let cleared = self.guard(|store| store.clear())?;
        self.rerender();
        if cleared.is_some() {
            self.toast(Toast::success(MSG_CLEARED));
        }
        Ok(cleared.is_some())
    }

    /// The checkout button was clicked. Checkout is simulated.
    pub fn on_checkout(&mut self) -> bool {
        let cart = self.store.load();
        match checkout::simulate(&cart) {
            Ok(summary) => {
                let data = serde_json::to_value(&summary).unwrap_or_default();
                self.logger
                    .info_builder("Checkout Data")
                    .field("reference", summary.reference.to_string())
                    .field("checkout", data)
                    .emit();
                self.toast(Toast::success(MSG_CHECKOUT));
                true
            }
            Err(_) => {
                self.toast(Toast::error(MSG_EMPTY_CHECKOUT));
                false
            }
        }
    }

    /// Advance page time, running due toast dismissals and navigations.
    pub fn tick(&mut self, now: Duration) {
        for task in self.timers.advance_to(now) {
            match task {
                PageTask::DismissToast(id) => {
                    self.toasts.dismiss(id);
                }
                PageTask::Navigate(url) => {
                    self.logger
                        .debug_builder("navigating")
                        .field("url", url.as_str())
                        .emit();
                    self.navigator.navigate(&url);
                }
            }
        }
    }

    /// Cart-count indicator kept current by the store.
    pub fn badge(&self) -> &CartBadge {
        &self.badge
    }

    /// Toasts on screen and recently shown.
    pub fn toasts(&self) -> &ToastTray {
        &self.toasts
    }

    /// Last rendered cart surface, if the page has one.
    pub fn cart_page(&self) -> Option<&CartPage> {
        self.rendered.as_ref()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Run a store call. Rejections become error toasts and `Ok(None)`;
    /// storage failures are logged, toasted and returned.
    fn guard<T>(
        &mut self,
        op: impl FnOnce(&CartStore<S>) -> Result<T, CommerceError>,
    ) -> Result<Option<T>, CommerceError> {
        match op(&self.store) {
            Ok(value) => Ok(Some(value)),
            Err(CommerceError::ItemNotInCart(key)) => {
                self.logger
                    .debug_builder("stale cart key")
                    .field("key", key)
                    .emit();
                Ok(None)
            }
            Err(e) if e.is_rejection() => {
                let message = match e {
                    CommerceError::InvalidQuantity(_) => MSG_INVALID_QUANTITY,
                    CommerceError::Overflow => MSG_QUANTITY_TOO_LARGE,
                    _ => MSG_INCOMPLETE_PRODUCT,
                };
                self.toast(Toast::error(message));
                Ok(None)
            }
            Err(e) => {
                self.logger
                    .error_builder("cart storage failed")
                    .field("error", e.to_string())
                    .emit();
                self.toast(Toast::error(MSG_STORAGE_FAILED));
                Err(e)
            }
        }
    }

    fn toast(&mut self, toast: Toast) {
        let id = self.toasts.show(toast);
        self.timers
            .schedule(self.config.toast_timeout(), PageTask::DismissToast(id));
    }

    fn rerender(&mut self) {
        if self.cart_surface {
            let cart = self.store.load();
            self.rendered = Some(render_cart_page(&cart, &self.config));
        }
    }
}
