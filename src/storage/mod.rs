//! Persistent key-value storage.
//!
//! The rest of the application only sees [`Storage`], a cheap clonable handle
//! over a [`KeyValueStore`] implementation. Values are JSON-serialized strings,
//! mirroring how a browser's local storage would be used.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// Key holding the JSON array of pending bets.
pub const BETSLIP_KEY: &str = "gingermarket_betslip";
/// Key holding the "first-login prompt shown" flag.
pub const FIRST_LOGIN_KEY: &str = "gingermarket_first_login";
/// Key holding the default bet amount.
pub const DEFAULT_AMOUNT_KEY: &str = "gingermarket_default_amount";

/// A string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

/// Shared handle to the session's persistent store.
#[derive(Clone)]
pub struct Storage {
    inner: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Wrap a store implementation.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// A fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Read the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    /// Store a raw value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value)
    }

    /// Remove a key.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key)
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// An absent key yields `Ok(None)`; a malformed value yields an error.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.inner.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.inner.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use mockall::predicate::eq;

    #[test]
    fn test_json_round_trip() {
        let storage = Storage::in_memory();
        storage.set_json("numbers", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = storage.get_json("numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_absent_key_is_none() {
        let storage = Storage::in_memory();
        let loaded: Option<bool> = storage.get_json("missing").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_malformed_value_is_error() {
        let storage = Storage::in_memory();
        storage.set("broken", "{not json").unwrap();
        let loaded: Result<Option<Vec<u32>>> = storage.get_json("broken");
        assert!(matches!(loaded, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_delegates_to_backend() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_set()
            .with(eq(FIRST_LOGIN_KEY), eq("true"))
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_get()
            .with(eq(FIRST_LOGIN_KEY))
            .times(1)
            .returning(|_| Ok(Some("true".to_string())));

        let storage = Storage::new(mock);
        storage.set_json(FIRST_LOGIN_KEY, &true).unwrap();
        assert_eq!(storage.get_json::<bool>(FIRST_LOGIN_KEY).unwrap(), Some(true));
    }
}
