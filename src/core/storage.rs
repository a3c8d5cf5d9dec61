//! Local key-value storage.
//!
//! [`KeyValueStore`] is the small get/set/remove/clear interface the persistence
//! adapter is written against. [`SqliteStore`] keeps values in the `kv_entries`
//! table; [`MemoryStore`] keeps them in a map and is used by tests.

use crate::{
    entities::{KvEntry, kv_entry},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// A string-to-string store. Values are opaque text (JSON in practice).
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Deletes every key.
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Key-value store backed by the local `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Wraps a connection whose tables were already created.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntry::find()
            .filter(kv_entry::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(entry.map(|e| e.value))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        let entry = kv_entry::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        KvEntry::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entry::Column::Key)
                    .update_columns([kv_entry::Column::Value, kv_entry::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        KvEntry::delete_many()
            .filter(kv_entry::Column::Key.eq(key))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let result = KvEntry::delete_many().exec(&self.db).await?;
        debug!("Cleared {} stored entries", result.rows_affected);
        Ok(())
    }
}

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Database(DbErr::Custom("memory store lock poisoned".to_string())))?;
        Ok(f(&mut entries))
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }

    async fn clear(&self) -> Result<()> {
        self.with_entries(HashMap::clear)
    }
}

impl<S: KeyValueStore + Sync> KeyValueStore for &S {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).remove(key)
    }

    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        (**self).clear()
    }
}
