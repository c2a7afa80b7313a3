//! Derived cart figures. Everything here is recomputed per call.

use crate::core::catalog::Catalog;
use crate::domain::model::{Cart, Plan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine<'a> {
    pub plan: &'a Plan,
    pub qty: u32,
    pub subtotal: u64,
}

/// Sum of quantities, including items whose plan is unknown.
pub fn item_count(cart: &Cart) -> u64 {
    cart.items.iter().map(|i| u64::from(i.qty)).sum()
}

/// Monthly total over known plans; stale plan ids contribute nothing.
pub fn total(cart: &Cart, catalog: &Catalog) -> u64 {
    lines(cart, catalog).iter().map(|line| line.subtotal).sum()
}

/// Priced lines in cart order, skipping plans missing from the catalog.
pub fn lines<'a>(cart: &Cart, catalog: &'a Catalog) -> Vec<PricedLine<'a>> {
    cart.items
        .iter()
        .filter_map(|item| {
            catalog.find(&item.plan_id).map(|plan| PricedLine {
                plan,
                qty: item.qty,
                subtotal: plan.price_monthly.saturating_mul(u64::from(item.qty)),
            })
        })
        .collect()
}
