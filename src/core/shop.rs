use crate::core::cart_store::CartStore;
use crate::core::catalog::Catalog;
use crate::core::checkout::{self, CheckoutForm, CheckoutIssue};
use crate::core::consent::ConsentLedger;
use crate::core::order::OrderRecorder;
use crate::core::pricing;
use crate::domain::ports::{ChangeNotifier, KeyValueStore};
use serde::{Deserialize, Serialize};

pub const CART_SLOT: &str = "spc_cart_v1";
pub const CONSENT_SLOT: &str = "spc_cookie_consent_v1";
pub const LAST_ORDER_SLOT: &str = "spc_last_order_v1";

/// Storage keys for the three persisted slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotNames {
    pub cart: String,
    pub consent: String,
    pub last_order: String,
}

impl Default for SlotNames {
    fn default() -> Self {
        Self {
            cart: CART_SLOT.to_string(),
            consent: CONSENT_SLOT.to_string(),
            last_order: LAST_ORDER_SLOT.to_string(),
        }
    }
}

/// The one-per-process handle the presentation layer works against.
pub struct Shop<S: KeyValueStore, N: ChangeNotifier> {
    catalog: Catalog,
    carts: CartStore<S, N>,
    slots: SlotNames,
}

impl<S: KeyValueStore, N: ChangeNotifier> Shop<S, N> {
    pub fn new(catalog: Catalog, storage: S, notifier: N, slots: SlotNames) -> Self {
        let carts = CartStore::new(storage, notifier, slots.cart.clone());
        Self {
            catalog,
            carts,
            slots,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn carts(&self) -> &CartStore<S, N> {
        &self.carts
    }

    pub fn slots(&self) -> &SlotNames {
        &self.slots
    }

    pub fn orders(&self) -> OrderRecorder<'_, S, N> {
        OrderRecorder::new(&self.carts, &self.catalog, &self.slots.last_order)
    }

    pub fn consent(&self) -> ConsentLedger<'_, S> {
        ConsentLedger::new(self.carts.storage(), &self.slots.consent)
    }

    pub fn item_count(&self) -> u64 {
        pricing::item_count(&self.carts.get())
    }

    pub fn total(&self) -> u64 {
        pricing::total(&self.carts.get(), &self.catalog)
    }

    /// Validates against the cart as currently stored.
    pub fn validate(&self, form: &CheckoutForm) -> Vec<CheckoutIssue> {
        checkout::validate(form, &self.carts.get())
    }
}
