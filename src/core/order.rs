use crate::core::cart_store::CartStore;
use crate::core::catalog::Catalog;
use crate::core::checkout::{self, CheckoutForm, CheckoutIssue};
use crate::core::{pricing, slots};
use crate::domain::model::{Cart, CustomerInfo, Order};
use crate::domain::ports::{ChangeNotifier, KeyValueStore};
use crate::utils::error::{Result, ShopError};
use chrono::{DateTime, Utc};

/// Turns a checked-out cart into the single stored "last order".
pub struct OrderRecorder<'a, S: KeyValueStore, N: ChangeNotifier> {
    carts: &'a CartStore<S, N>,
    catalog: &'a Catalog,
    slot: &'a str,
}

impl<'a, S: KeyValueStore, N: ChangeNotifier> OrderRecorder<'a, S, N> {
    pub fn new(carts: &'a CartStore<S, N>, catalog: &'a Catalog, slot: &'a str) -> Self {
        Self {
            carts,
            catalog,
            slot,
        }
    }

    pub fn place_order(&self, form: &CheckoutForm, cart: &Cart) -> Result<Order> {
        self.place_order_at(form, cart, Utc::now())
    }

    /// Snapshots `cart`, stores it and clears the live cart.
    ///
    /// If the snapshot cannot be stored the cart is left alone so the
    /// submission can be retried. A failed clear is only logged.
    pub fn place_order_at(
        &self,
        form: &CheckoutForm,
        cart: &Cart,
        at: DateTime<Utc>,
    ) -> Result<Order> {
        let issues = checkout::validate(form, cart);
        if issues.contains(&CheckoutIssue::EmptyCart) {
            return Err(ShopError::EmptyCartError);
        }
        if !issues.is_empty() {
            return Err(ShopError::InvalidOrderError {
                message: checkout::messages(&issues).join(" "),
            });
        }
        let Some(payment) = form.payment_method() else {
            return Err(ShopError::InvalidOrderError {
                message: CheckoutIssue::MissingPayment.message().to_string(),
            });
        };

        let order = Order {
            ts: at.timestamp_millis(),
            customer: CustomerInfo {
                company: form.company().to_string(),
                fullname: form.fullname().to_string(),
                email: form.email().to_string(),
                country: form.country().to_string(),
            },
            payment,
            items: cart.items.clone(),
            total_monthly: pricing::total(cart, self.catalog),
        };

        slots::write_json(self.carts.storage(), self.slot, &order)?;
        tracing::info!(
            "order {} recorded: {} position(s), {} per month",
            order.display_id(),
            order.items.len(),
            order.total_monthly
        );

        if let Some(e) = self.carts.clear().persist_error {
            tracing::warn!("order {} stored but cart not cleared: {}", order.display_id(), e);
        }
        Ok(order)
    }

    /// The most recent order, if one was stored and is still readable.
    pub fn last_order(&self) -> Option<Order> {
        slots::load_or_none(self.carts.storage(), self.slot)
    }
}
