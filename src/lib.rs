pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ShopConfig;

pub use adapters::{FileStore, MemoryStore};
pub use self::core::{
    cart_store::{CartStore, CartUpdate},
    catalog::Catalog,
    checkout::{validate, CheckoutForm, CheckoutIssue},
    events::ChangeHub,
    order::OrderRecorder,
    shop::{Shop, SlotNames},
};
pub use utils::error::{Result, ShopError};
