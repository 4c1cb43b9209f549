//! UserRepository implementation for SqliteStore.

use super::{SqliteStore, is_unique_violation};
use crate::domain::{User, UserId};
use crate::store::{StoreError, StoreResult, UserRepository};
use rusqlite::{OptionalExtension, Row, params};

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User::new(
        UserId::new(row.get(0)?),
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
    ))
}

impl UserRepository for SqliteStore {
    fn create_user(&mut self, username: &str, password_hash: &str) -> StoreResult<User> {
        let inserted = self.conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)",
            params![username, password_hash],
        );

        match inserted {
            Ok(_) => Ok(User::new(
                UserId::new(self.conn.last_insert_rowid()),
                username,
                password_hash,
            )),
            Err(e) if is_unique_violation(&e, "users.username") => {
                Err(StoreError::DuplicateUsername {
                    username: username.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, username, password_hash FROM users WHERE id = ?",
                [id.get()],
                user_from_row,
            )
            .optional()?)
    }

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, username, password_hash FROM users WHERE username = ?",
                [username],
                user_from_row,
            )
            .optional()?)
    }
}
