//! SQLite persistence behind repository traits

mod repository;
mod schema;
mod sqlite;

pub use repository::{
    NewsRepository, NoteRepository, StoreError, StoreResult, UserRepository,
};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::SqliteStore;
