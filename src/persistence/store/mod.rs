//! Key-value document storage.
//!
//! Callers see a flat namespace of string keys holding JSON documents. Writes
//! to a single key replace the previous document; there is no merge.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::PersistenceError;
use super::schema::{is_in_memory_url, open_connection, storage_table_exists};

/// Flat store of string documents keyed by name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw document stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replaces the document stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Reads and decodes the JSON document stored under `key`.
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidDocument`] when the stored text does not
/// decode into `T`, or any error reported by the store.
pub async fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, PersistenceError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|error| PersistenceError::InvalidDocument {
            key: key.to_owned(),
            message: error.to_string(),
        })
}

/// Encodes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidDocument`] when encoding fails, or any
/// error reported by the store.
pub async fn write_json<T>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError>
where
    T: Serialize + Sync + ?Sized,
{
    let encoded =
        serde_json::to_string(value).map_err(|error| PersistenceError::InvalidDocument {
            key: key.to_owned(),
            message: error.to_string(),
        })?;
    store.set(key, &encoded).await
}

/// Process-local store used when no database is configured.
///
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// SQLite-backed store persisting documents in the `storage_entries` table.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    database_url: String,
}

impl SqliteKeyValueStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank
    /// and [`PersistenceError::InMemoryDatabaseUrl`] for `:memory:`, which
    /// would hand every call a fresh, unmigrated database.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        if is_in_memory_url(&database_url_string) {
            return Err(PersistenceError::InMemoryDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        open_connection(&self.database_url)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match storage_table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            value: String,
        }

        let mut connection = self.establish_connection()?;

        let result: Option<Row> =
            sql_query("SELECT value FROM storage_entries WHERE key = ? LIMIT 1;")
                .bind::<Text, _>(key)
                .get_result(&mut connection)
                .optional()
                .map_err(|error| {
                    Self::map_error_with_schema_check(&mut connection, &error, |message| {
                        PersistenceError::QueryFailed { message }
                    })
                })?;

        Ok(result.map(|row| row.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO storage_entries (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET \
               value = excluded.value, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(key)
        .bind::<Text, _>(value)
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| {
            Self::map_error_with_schema_check(&mut connection, &error, |message| {
                PersistenceError::WriteFailed { message }
            })
        })
    }
}
