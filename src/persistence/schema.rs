//! Connection handling and schema checks shared by the migrator and the
//! `SQLite` store.

use diesel::Connection;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;

use super::PersistenceError;

/// Table holding every stored document.
pub(super) const STORAGE_TABLE: &str = "storage_entries";

/// `SQLite` URL naming a private database that vanishes with its connection.
pub const IN_MEMORY_DATABASE_URL: &str = ":memory:";

/// Returns true when `database_url` names a per-connection in-memory
/// database. Such a database cannot back a store that reconnects per call.
#[must_use]
pub fn is_in_memory_url(database_url: &str) -> bool {
    database_url.trim() == IN_MEMORY_DATABASE_URL
}

/// Opens a connection to `database_url`.
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] for a blank URL and
/// [`PersistenceError::ConnectionFailed`] when `SQLite` refuses it.
pub(super) fn open_connection(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let trimmed = database_url.trim();
    if trimmed.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }

    SqliteConnection::establish(trimmed).map_err(|error| PersistenceError::ConnectionFailed {
        message: error.to_string(),
    })
}

/// Reports whether the storage table exists on `connection`.
pub(super) fn storage_table_exists(
    connection: &mut SqliteConnection,
) -> Result<bool, diesel::result::Error> {
    #[derive(Debug, QueryableByName)]
    struct Row {
        #[diesel(sql_type = BigInt)]
        count: i64,
    }

    let row: Row = sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
    )
    .bind::<Text, _>(STORAGE_TABLE)
    .get_result(connection)?;

    Ok(row.count > 0)
}
