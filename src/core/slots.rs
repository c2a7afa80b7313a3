//! JSON encoding of the persisted slots.

use crate::domain::ports::KeyValueStore;
use crate::utils::error::{Result, ShopError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Strict read: a missing or blank slot is `Ok(None)`, undecodable content
/// is `MalformedStateError`.
pub fn read_json<S, T>(storage: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| ShopError::MalformedStateError {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Lenient read: every failure degrades to `None` after being logged.
pub fn load_or_none<S, T>(storage: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match read_json(storage, key) {
        Ok(value) => value,
        Err(e @ ShopError::MalformedStateError { .. }) => {
            tracing::debug!("ignoring unreadable slot: {}", e);
            None
        }
        Err(e) => {
            tracing::warn!("storage read failed: {}", e);
            None
        }
    }
}

pub fn write_json<S, T>(storage: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::model::Cart;

    #[test]
    fn test_blank_and_missing_slots_read_as_none() {
        let store = MemoryStore::new();
        assert_eq!(read_json::<_, Cart>(&store, "cart").unwrap(), None);
        store.set("cart", "   ").unwrap();
        assert_eq!(read_json::<_, Cart>(&store, "cart").unwrap(), None);
    }

    #[test]
    fn test_garbage_is_malformed_strictly_and_none_leniently() {
        let store = MemoryStore::new();
        store.set("cart", "{not json").unwrap();
        assert!(matches!(
            read_json::<_, Cart>(&store, "cart"),
            Err(ShopError::MalformedStateError { .. })
        ));
        assert_eq!(load_or_none::<_, Cart>(&store, "cart"), None);
    }
}
