//! SQLite-backed store implementation.

mod connection;
mod news;
mod notes;
mod users;


use rusqlite::Connection;

/// SQLite-backed store for both sites.
///
/// Owns a single connection. The web layer shares it behind a mutex.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

/// Returns true if `err` is a UNIQUE violation on `column` (`table.column`).
pub(crate) fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(message)) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation && message.contains(column)
        }
        _ => false,
    }
}
