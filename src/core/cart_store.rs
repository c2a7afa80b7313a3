use crate::core::slots;
use crate::domain::model::{Cart, CartItem};
use crate::domain::ports::{CartChange, ChangeNotifier, ChangeOrigin, KeyValueStore};
use crate::utils::error::{Result, ShopError};

pub const MIN_QTY: u32 = 1;
pub const MAX_QTY: u32 = 99;

/// Clamps an integer quantity into `MIN_QTY..=MAX_QTY`.
pub fn clamp_quantity(value: i64) -> u32 {
    value.clamp(i64::from(MIN_QTY), i64::from(MAX_QTY)) as u32
}

/// Turns raw field input into a quantity. Anything that is not a number,
/// and zero, becomes 1; fractions are truncated before clamping.
pub fn coerce_quantity(raw: &str) -> u32 {
    match parse_numeric_input(raw.trim()) {
        Some(value) if value.is_nan() || value == 0.0 => MIN_QTY,
        Some(value) => value.clamp(f64::from(MIN_QTY), f64::from(MAX_QTY)).trunc() as u32,
        None => MIN_QTY,
    }
}

/// Numeric form input: signed decimals with an optional exponent, the
/// `Infinity` spelling, and unsigned `0x`/`0o`/`0b` integers. Rust-only
/// spellings such as `inf` or `nan` are not numbers here.
fn parse_numeric_input(input: &str) -> Option<f64> {
    if input.is_empty() {
        return None;
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let digits = input
            .strip_prefix(prefix)
            .or_else(|| input.strip_prefix(&prefix.to_ascii_uppercase()));
        if let Some(digits) = digits {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return Some(
                u128::from_str_radix(digits, radix)
                    .map(|v| v as f64)
                    .unwrap_or(f64::INFINITY),
            );
        }
    }

    let unsigned = input.strip_prefix(['+', '-']).unwrap_or(input);
    if unsigned == "Infinity" {
        return Some(if input.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    let decimal = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return None;
    }
    input.parse::<f64>().ok()
}

/// Outcome of a mutation. The cart is always the post-mutation value, even
/// when it could not be written back.
#[derive(Debug)]
#[must_use]
pub struct CartUpdate {
    pub cart: Cart,
    pub persist_error: Option<ShopError>,
}

impl CartUpdate {
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_result(self) -> Result<Cart> {
        match self.persist_error {
            Some(e) => Err(e),
            None => Ok(self.cart),
        }
    }
}

/// Owner of the persisted cart slot.
///
/// Every mutation reads the slot, applies the change, writes the whole cart
/// back and then notifies observers. Observers only hear about writes that
/// reached storage.
pub struct CartStore<S: KeyValueStore, N: ChangeNotifier> {
    storage: S,
    notifier: N,
    key: String,
}

impl<S: KeyValueStore, N: ChangeNotifier> CartStore<S, N> {
    pub fn new(storage: S, notifier: N, key: impl Into<String>) -> Self {
        Self {
            storage,
            notifier,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Current cart; absent, unreadable or malformed slots yield an empty one.
    pub fn get(&self) -> Cart {
        slots::load_or_none::<_, Cart>(&self.storage, &self.key)
            .map(Cart::normalized)
            .unwrap_or_default()
    }

    /// Adds `qty` to an existing item, or appends a new one. A new item
    /// never starts below `MIN_QTY`.
    pub fn add(&self, plan_id: &str, qty: u32) -> CartUpdate {
        let mut cart = self.get();
        match cart.item_mut(plan_id) {
            Some(item) => item.qty = item.qty.saturating_add(qty),
            None => cart.items.push(CartItem {
                plan_id: plan_id.to_string(),
                qty: qty.max(MIN_QTY),
            }),
        }
        tracing::info!("added {} x {} to cart", qty, plan_id);
        self.commit(cart)
    }

    pub fn remove(&self, plan_id: &str) -> CartUpdate {
        let mut cart = self.get();
        cart.items.retain(|i| i.plan_id != plan_id);
        tracing::info!("removed {} from cart", plan_id);
        self.commit(cart)
    }

    /// Sets a quantity from raw form input. Unknown plan ids leave the cart
    /// untouched and skip persistence.
    pub fn set_quantity(&self, plan_id: &str, raw: &str) -> CartUpdate {
        self.apply_quantity(plan_id, coerce_quantity(raw))
    }

    pub fn set_quantity_value(&self, plan_id: &str, qty: i64) -> CartUpdate {
        self.apply_quantity(plan_id, clamp_quantity(qty))
    }

    pub fn clear(&self) -> CartUpdate {
        tracing::info!("clearing cart");
        self.commit(Cart::default())
    }

    /// Entry point for "someone else wrote storage" signals. Returns the
    /// freshly read cart when the signal concerns the cart slot.
    pub fn handle_storage_signal(&self, key: &str) -> Option<Cart> {
        if key != self.key {
            return None;
        }
        let cart = self.get();
        tracing::debug!("cart slot changed externally ({} item(s))", cart.items.len());
        self.notifier.notify(&CartChange {
            origin: ChangeOrigin::External,
            cart: cart.clone(),
        });
        Some(cart)
    }

    fn apply_quantity(&self, plan_id: &str, qty: u32) -> CartUpdate {
        let mut cart = self.get();
        let Some(item) = cart.item_mut(plan_id) else {
            tracing::debug!("ignoring quantity change for {}: not in cart", plan_id);
            return CartUpdate {
                cart,
                persist_error: None,
            };
        };
        item.qty = qty;
        tracing::info!("set quantity of {} to {}", plan_id, qty);
        self.commit(cart)
    }

    fn commit(&self, cart: Cart) -> CartUpdate {
        if let Err(e) = slots::write_json(&self.storage, &self.key, &cart) {
            tracing::warn!("cart not persisted: {}", e);
            return CartUpdate {
                cart,
                persist_error: Some(e),
            };
        }
        self.notifier.notify(&CartChange {
            origin: ChangeOrigin::Local,
            cart: cart.clone(),
        });
        CartUpdate {
            cart,
            persist_error: None,
        }
    }
}
