//! NewsRepository implementation for SqliteStore.

use super::SqliteStore;
use crate::domain::{Comment, CommentId, NewComment, NewNews, News, NewsId, UserId};
use crate::store::{NewsRepository, StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Row, params};

const DATE_FORMAT: &str = "%Y-%m-%d";

const COMMENT_SELECT: &str = "SELECT c.id, c.news_id, c.author_id, u.username, c.text, c.created
     FROM comments c JOIN users u ON u.id = c.author_id";

/// Formats a timestamp so that text order matches time order.
fn format_created(created: DateTime<Utc>) -> String {
    created.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(StoreError::CorruptRow(message)),
    )
}

fn news_from_row(row: &Row<'_>) -> rusqlite::Result<News> {
    let date_str: String = row.get(3)?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| conversion_error(3, format!("invalid news date {date_str:?}: {e}")))?;

    Ok(News {
        id: NewsId::new(row.get(0)?),
        title: row.get(1)?,
        text: row.get(2)?,
        date,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    let created_str: String = row.get(5)?;
    let created = DateTime::parse_from_rfc3339(&created_str)
        .map_err(|e| conversion_error(5, format!("invalid comment timestamp {created_str:?}: {e}")))?
        .with_timezone(&Utc);

    Ok(Comment {
        id: CommentId::new(row.get(0)?),
        news: NewsId::new(row.get(1)?),
        author: UserId::new(row.get(2)?),
        author_name: row.get(3)?,
        text: row.get(4)?,
        created,
    })
}

fn comment_not_found(id: CommentId) -> StoreError {
    StoreError::NotFound {
        kind: "comment",
        id: id.get(),
    }
}

impl NewsRepository for SqliteStore {
    fn insert_news(&mut self, news: &NewNews) -> StoreResult<News> {
        self.conn.execute(
            "INSERT INTO news (title, text, date) VALUES (?, ?, ?)",
            params![news.title, news.text, news.date.format(DATE_FORMAT).to_string()],
        )?;

        Ok(News {
            id: NewsId::new(self.conn.last_insert_rowid()),
            title: news.title.clone(),
            text: news.text.clone(),
            date: news.date,
        })
    }

    fn news_by_id(&self, id: NewsId) -> StoreResult<Option<News>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, title, text, date FROM news WHERE id = ?",
                [id.get()],
                news_from_row,
            )
            .optional()?)
    }

    fn latest_news(&self, limit: usize) -> StoreResult<Vec<News>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, text, date FROM news ORDER BY date DESC, id DESC LIMIT ?",
        )?;
        // SQLite treats a negative LIMIT as "no limit"; clamp instead of wrapping.
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let news = stmt
            .query_map([limit], news_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(news)
    }

    fn insert_comment(&mut self, comment: &NewComment) -> StoreResult<Comment> {
        self.conn.execute(
            "INSERT INTO comments (news_id, author_id, text, created) VALUES (?, ?, ?, ?)",
            params![
                comment.news.get(),
                comment.author.get(),
                comment.text,
                format_created(comment.created)
            ],
        )?;

        let id = CommentId::new(self.conn.last_insert_rowid());
        self.comment_by_id(id)?.ok_or_else(|| comment_not_found(id))
    }

    fn comment_by_id(&self, id: CommentId) -> StoreResult<Option<Comment>> {
        Ok(self
            .conn
            .query_row(
                &format!("{COMMENT_SELECT} WHERE c.id = ?"),
                [id.get()],
                comment_from_row,
            )
            .optional()?)
    }

    fn comments_for(&self, news: NewsId) -> StoreResult<Vec<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT} WHERE c.news_id = ? ORDER BY c.created, c.id"))?;
        let comments = stmt
            .query_map([news.get()], comment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(comments)
    }

    fn update_comment_text(&mut self, id: CommentId, text: &str) -> StoreResult<Comment> {
        let changed = self.conn.execute(
            "UPDATE comments SET text = ? WHERE id = ?",
            params![text, id.get()],
        )?;
        if changed == 0 {
            return Err(comment_not_found(id));
        }
        self.comment_by_id(id)?.ok_or_else(|| comment_not_found(id))
    }

    fn delete_comment(&mut self, id: CommentId) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?", [id.get()])?;
        if removed == 0 {
            return Err(comment_not_found(id));
        }
        Ok(())
    }

    fn count_comments(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
