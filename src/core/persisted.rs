//! State that mirrors itself into a [`KeyValueStore`].
//!
//! A [`Persisted`] value is read once when it is created and written back on
//! every change. Storage trouble never reaches the caller: it is logged, and
//! the value keeps living in memory for the rest of the session.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use super::storage::KeyValueStore;

/// A value of type `T` bound to `key` in store `S`.
#[derive(Debug)]
pub struct Persisted<T, S> {
    store: S,
    key: String,
    value: T,
    degraded: bool,
}

impl<T, S> Persisted<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Loads `key` from `store`, using `default` when the key is absent,
    /// unreadable or does not decode as `T`.
    pub async fn load(store: S, key: &str, default: T) -> Self {
        Self::load_validated(store, key, default, |_| true).await
    }

    /// Like [`Persisted::load`], but a decoded value that `is_valid` rejects
    /// is also replaced by `default`.
    #[instrument(skip(store, default, is_valid))]
    pub async fn load_validated(
        store: S,
        key: &str,
        default: T,
        is_valid: impl FnOnce(&T) -> bool,
    ) -> Self {
        let mut degraded = false;
        let value = match store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) if is_valid(&value) => {
                    debug!("Restored '{key}' from local store");
                    value
                }
                Ok(_) => {
                    warn!("Stored value for '{key}' breaks its rules, using default");
                    default
                }
                Err(e) => {
                    warn!("Stored value for '{key}' is unreadable, using default: {e}");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!("Could not read '{key}' from local store, keeping it in memory: {e}");
                degraded = true;
                default
            }
        };

        Self {
            store,
            key: key.to_string(),
            value,
            degraded,
        }
    }

    /// Current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Storage key this value is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// True once a read or write against the store has failed.
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Replaces the value and writes it through to the store.
    pub async fn set(&mut self, value: T) {
        self.value = value;
        self.write_through().await;
    }

    /// Mutates the value in place and writes it through to the store.
    pub async fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.write_through().await;
        result
    }

    async fn write_through(&mut self) {
        let encoded = match serde_json::to_string(&self.value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Could not encode '{}', keeping it in memory: {e}", self.key);
                self.degraded = true;
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &encoded).await {
            warn!("Could not write '{}' to local store, keeping it in memory: {e}", self.key);
            self.degraded = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use crate::errors::Result;
    use crate::test_utils::{FailingStore, init_test_tracing, setup_test_store};

    #[tokio::test]
    async fn test_missing_key_uses_default() {
        let store = MemoryStore::new();
        let role = Persisted::load(&store, "userRole", String::new()).await;
        assert_eq!(role.get(), "");
        assert!(!role.is_degraded());
    }

    #[tokio::test]
    async fn test_set_then_reload_yields_same_value() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store().await?;

        let mut numbers = Persisted::load(&store, "numbers", Vec::<u32>::new()).await;
        numbers.set(vec![3, 1, 2]).await;

        let reloaded = Persisted::load(&store, "numbers", Vec::<u32>::new()).await;
        assert_eq!(reloaded.get(), &vec![3, 1, 2]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_is_written_through() -> Result<()> {
        let store = MemoryStore::new();
        let mut numbers = Persisted::load(&store, "numbers", vec![1_u32]).await;
        let len = numbers.update(|v| {
            v.insert(0, 0);
            v.len()
        })
        .await;
        assert_eq!(len, 2);
        assert_eq!(store.get("numbers").await?.as_deref(), Some("[0,1]"));
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupted_value_falls_back_to_default() -> Result<()> {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").await?;

        let numbers = Persisted::load(&store, "numbers", vec![7_u32]).await;
        assert_eq!(numbers.get(), &vec![7]);
        assert!(!numbers.is_degraded());
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_shape_falls_back_to_default() -> Result<()> {
        let store = MemoryStore::new();
        store.set("numbers", "\"a string, not a list\"").await?;

        let numbers = Persisted::load(&store, "numbers", Vec::<u32>::new()).await;
        assert!(numbers.get().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_value_falls_back_to_default() -> Result<()> {
        let store = MemoryStore::new();
        store.set("numbers", "[1,200]").await?;

        let numbers =
            Persisted::load_validated(&store, "numbers", vec![7_u32], |v| v.iter().all(|n| *n < 100))
                .await;
        assert_eq!(numbers.get(), &vec![7]);
        assert!(!numbers.is_degraded());

        let accepted =
            Persisted::load_validated(&store, "numbers", vec![7_u32], |v| v.len() == 2).await;
        assert_eq!(accepted.get(), &vec![1, 200]);
        Ok(())
    }

    #[tokio::test]
    async fn test_failing_store_degrades_to_memory() {
        init_test_tracing();
        let store = FailingStore;

        let mut numbers = Persisted::load(&store, "numbers", vec![1_u32]).await;
        assert!(numbers.is_degraded());

        numbers.set(vec![1, 2]).await;
        assert_eq!(numbers.get(), &vec![1, 2]);
        assert!(numbers.is_degraded());
    }
}
