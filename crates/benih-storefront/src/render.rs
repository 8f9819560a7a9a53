//! Cart page renderer.
//!
//! The cart surface is rebuilt from the stored cart on every load and after
//! every change, so rendering is a pure function of the cart.

use benih_commerce::cart::{compute_totals, Cart, CartItem};

use crate::config::StorefrontConfig;

/// Rendered cart surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPage {
    /// Inner HTML of the cart container.
    pub items_html: String,
    /// Summary box contents; `None` hides the box.
    pub summary: Option<CartSummary>,
}

impl CartPage {
    /// Whether the page shows the empty-cart message.
    pub fn is_empty_state(&self) -> bool {
        self.summary.is_none()
    }
}

/// Formatted amounts for the summary box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: String,
    pub total: String,
    pub count: u64,
}

/// Render the cart page for `cart`.
pub fn render_cart_page(cart: &Cart, config: &StorefrontConfig) -> CartPage {
    if cart.is_empty() {
        return CartPage {
            items_html: render_empty(config),
            summary: None,
        };
    }

    let items_html = cart
        .iter()
        .map(|item| render_item(item, config))
        .collect::<Vec<_>>()
        .join("\n");

    let totals = compute_totals(cart);
    CartPage {
        items_html,
        summary: Some(CartSummary {
            subtotal: totals.total.display_amount(),
            total: totals.total.display_amount(),
            count: totals.count,
        }),
    }
}

fn render_empty(config: &StorefrontConfig) -> String {
    format!(
        r#"<div class="empty" style="grid-column: 1 / -1; text-align:center;padding:40px;">
    <h3>Keranjang kosong</h3>
    <p>Yuk, tambah produk dari daftar produk!</p>
    <a href="{href}" class="btn-primary">Belanja Sekarang</a>
</div>"#,
        href = escape_html(&config.shop_anchor)
    )
}

fn render_item(item: &CartItem, config: &StorefrontConfig) -> String {
    let image = if item.image.is_empty() {
        &config.fallback_image
    } else {
        &item.image
    };
    let key = escape_html(&item.key().to_string());
    let name = escape_html(&item.name);

    format!(
        r#"<div class="cart-item fade-in-up" data-key="{key}">
    <img src="{image}" alt="{name}">
    <h4>{name}</h4>
    <span class="price">{price}</span>
    <input type="number" class="qty" value="{qty}" min="1" data-key="{key}">
    <span class="total">{total}</span>
    <button class="remove-btn" data-key="{key}"><i class="fa fa-trash"></i></button>
</div>"#,
        key = key,
        image = escape_html(image),
        name = name,
        price = item.price.display_amount(),
        qty = item.quantity,
        total = item.line_total().display_amount(),
    )
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
