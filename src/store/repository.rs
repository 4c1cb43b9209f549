//! Repository traits and the store error type.

use crate::domain::{
    Comment, CommentId, NewComment, NewNews, News, NewsId, Note, NoteFields, NoteId, User, UserId,
};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another note already uses this slug.
    #[error("slug already in use: {slug}")]
    DuplicateSlug { slug: String },

    /// Another account already uses this username.
    #[error("username already taken: {username}")]
    DuplicateUsername { username: String },

    /// The record to update or delete does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be decoded.
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Account storage.
pub trait UserRepository {
    /// Creates an account. Fails with [`StoreError::DuplicateUsername`] if taken.
    fn create_user(&mut self, username: &str, password_hash: &str) -> StoreResult<User>;

    fn user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}

/// Note storage.
///
/// Slug uniqueness is enforced here: inserts and updates that would reuse a
/// slug fail with [`StoreError::DuplicateSlug`] and leave the table unchanged.
pub trait NoteRepository {
    fn insert_note(&mut self, author: UserId, fields: &NoteFields) -> StoreResult<Note>;

    /// Replaces title, text and slug. The author is never touched.
    fn update_note(&mut self, id: NoteId, fields: &NoteFields) -> StoreResult<Note>;

    fn delete_note(&mut self, id: NoteId) -> StoreResult<()>;

    fn note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>>;

    /// Returns the notes written by `author`, oldest first.
    fn notes_by_author(&self, author: UserId) -> StoreResult<Vec<Note>>;

    fn count_notes(&self) -> StoreResult<usize>;
}

/// News and comment storage.
pub trait NewsRepository {
    fn insert_news(&mut self, news: &NewNews) -> StoreResult<News>;

    fn news_by_id(&self, id: NewsId) -> StoreResult<Option<News>>;

    /// Returns up to `limit` news items, newest date first.
    fn latest_news(&self, limit: usize) -> StoreResult<Vec<News>>;

    fn insert_comment(&mut self, comment: &NewComment) -> StoreResult<Comment>;

    fn comment_by_id(&self, id: CommentId) -> StoreResult<Option<Comment>>;

    /// Returns the comments on `news` in creation order.
    fn comments_for(&self, news: NewsId) -> StoreResult<Vec<Comment>>;

    /// Replaces the text of a comment. Author, news and timestamp are kept.
    fn update_comment_text(&mut self, id: CommentId, text: &str) -> StoreResult<Comment>;

    fn delete_comment(&mut self, id: CommentId) -> StoreResult<()>;

    fn count_comments(&self) -> StoreResult<usize>;
}
