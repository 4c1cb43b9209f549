//! NoteRepository implementation for SqliteStore.

use super::{SqliteStore, is_unique_violation};
use crate::domain::{Note, NoteFields, NoteId, UserId};
use crate::store::{NoteRepository, StoreError, StoreResult};
use rusqlite::{OptionalExtension, Row, params};

const NOTE_COLUMNS: &str = "id, title, text, slug, author_id";

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note::new(
        NoteId::new(row.get(0)?),
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get::<_, String>(3)?,
        UserId::new(row.get(4)?),
    ))
}

fn map_slug_error(err: rusqlite::Error, slug: &str) -> StoreError {
    if is_unique_violation(&err, "notes.slug") {
        StoreError::DuplicateSlug {
            slug: slug.to_string(),
        }
    } else {
        err.into()
    }
}

impl SqliteStore {
    fn note_by_id(&self, id: NoteId) -> StoreResult<Option<Note>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
                [id.get()],
                note_from_row,
            )
            .optional()?)
    }
}

impl NoteRepository for SqliteStore {
    fn insert_note(&mut self, author: UserId, fields: &NoteFields) -> StoreResult<Note> {
        self.conn
            .execute(
                "INSERT INTO notes (title, text, slug, author_id) VALUES (?, ?, ?, ?)",
                params![fields.title, fields.text, fields.slug, author.get()],
            )
            .map_err(|e| map_slug_error(e, &fields.slug))?;

        Ok(Note::new(
            NoteId::new(self.conn.last_insert_rowid()),
            fields.title.as_str(),
            fields.text.as_str(),
            fields.slug.as_str(),
            author,
        ))
    }

    fn update_note(&mut self, id: NoteId, fields: &NoteFields) -> StoreResult<Note> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes SET title = ?, text = ?, slug = ? WHERE id = ?",
                params![fields.title, fields.text, fields.slug, id.get()],
            )
            .map_err(|e| map_slug_error(e, &fields.slug))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: "note",
                id: id.get(),
            });
        }

        self.note_by_id(id)?.ok_or(StoreError::NotFound {
            kind: "note",
            id: id.get(),
        })
    }

    fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", [id.get()])?;
        if removed == 0 {
            return Err(StoreError::NotFound {
                kind: "note",
                id: id.get(),
            });
        }
        Ok(())
    }

    fn note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE slug = ?"),
                [slug],
                note_from_row,
            )
            .optional()?)
    }

    fn notes_by_author(&self, author: UserId) -> StoreResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE author_id = ? ORDER BY id"
        ))?;
        let notes = stmt
            .query_map([author.get()], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn count_notes(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
