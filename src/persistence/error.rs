//! Error types for local persistence operations.

use thiserror::Error;

/// Errors returned while opening, migrating, or using the local store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database URL/path was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// `:memory:` was given where a database must outlive one connection.
    #[error("':memory:' cannot back a store that reconnects per call")]
    InMemoryDatabaseUrl,

    /// Establishing a `SQLite` connection failed.
    #[error("failed to connect to SQLite database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Running pending migrations failed.
    #[error("failed to run database migrations: {message}")]
    MigrationFailed {
        /// Error detail from Diesel migrations.
        message: String,
    },

    /// Reading the schema version from the migration table failed.
    #[error("failed to read schema version after migrations: {message}")]
    SchemaVersionQueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// The migrations completed but no schema version could be found.
    #[error("no schema version recorded after migrations ran")]
    MissingSchemaVersion,

    /// The storage table does not exist yet.
    #[error("storage schema is missing (run txlinks --migrate-db)")]
    SchemaNotInitialised,

    /// Reading an entry failed.
    #[error("failed to read stored entry: {message}")]
    QueryFailed {
        /// Error detail from the backend.
        message: String,
    },

    /// Writing an entry failed.
    #[error("failed to write stored entry: {message}")]
    WriteFailed {
        /// Error detail from the backend.
        message: String,
    },

    /// A stored document could not be encoded or decoded as JSON.
    #[error("stored document for key '{key}' is not valid: {message}")]
    InvalidDocument {
        /// Storage key of the offending document.
        key: String,
        /// Error detail from `serde_json`.
        message: String,
    },
}
