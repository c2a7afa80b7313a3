use crate::domain::model::Cart;
use crate::utils::error::Result;
use std::sync::Arc;

/// String-keyed blob storage, the shape of a browser's `localStorage`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Mutation made through this store instance.
    Local,
    /// Another context wrote the shared slot.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChange {
    pub origin: ChangeOrigin,
    pub cart: Cart,
}

pub trait ChangeNotifier: Send + Sync {
    fn notify(&self, change: &CartChange);
}

impl ChangeNotifier for () {
    fn notify(&self, _change: &CartChange) {}
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for Arc<T> {
    fn notify(&self, change: &CartChange) {
        (**self).notify(change)
    }
}
