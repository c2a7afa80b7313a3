pub mod cart_store;
pub mod catalog;
pub mod checkout;
pub mod consent;
pub mod events;
pub mod order;
pub mod pricing;
pub mod receipt;
pub mod shop;
pub mod slots;

pub use crate::domain::model::{Cart, CartItem, ConsentRecord, CustomerInfo, Order, PaymentMethod, Plan};
pub use crate::domain::ports::{CartChange, ChangeNotifier, ChangeOrigin, KeyValueStore};
pub use crate::utils::error::Result;
