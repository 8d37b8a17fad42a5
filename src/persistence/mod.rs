//! Local persistence for configuration and cached lookups.
//!
//! Everything txlinks persists is a JSON document stored under a string key.
//! The `SQLite` backend keeps those documents across restarts and is managed
//! with Diesel migrations; the in-memory backend is used when no database is
//! configured.

mod error;
mod migrator;
mod schema;
mod store;

pub use error::PersistenceError;
pub use migrator::{INITIAL_SCHEMA_VERSION, MIGRATIONS, SchemaVersion, migrate_database};
pub use schema::{IN_MEMORY_DATABASE_URL, is_in_memory_url};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, read_json, write_json,
};

#[cfg(test)]
pub use store::MockKeyValueStore;
