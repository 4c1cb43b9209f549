//! News items and reader comments.

use crate::domain::policy::Owned;
use crate::domain::validation::{FormErrors, max_chars, require};
use crate::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum news title length.
pub const NEWS_TITLE_MAX_LENGTH: usize = 50;

/// Form error shown when a comment contains a banned word.
pub const BAD_WORDS_WARNING: &str = "Watch your language!";

/// Words rejected in comments unless the config overrides the list.
pub const DEFAULT_BAD_WORDS: &[&str] = &["редиска", "негодяй"];

/// Database identifier of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(i64);

impl NewsId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct News {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// A news item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

impl NewNews {
    /// Validates title and text.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, FormErrors> {
        let title = title.into();
        let text = text.into();
        let mut errors = FormErrors::new();

        let title = require(&mut errors, "title", &title).to_string();
        max_chars(&mut errors, "title", &title, NEWS_TITLE_MAX_LENGTH);
        let text = require(&mut errors, "text", &text).to_string();

        errors.into_result(Self { title, text, date })
    }
}

/// A reader's comment on a news item.
///
/// `author_name` is joined in from the users table for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub news: NewsId,
    pub author: UserId,
    pub author_name: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Owned for Comment {
    fn owner(&self) -> UserId {
        self.author
    }
}

/// A comment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub news: NewsId,
    pub author: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Raw comment form input.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    /// Validates the comment text against the banned word list.
    ///
    /// Matching is a case-insensitive substring search.
    pub fn clean<S: AsRef<str>>(&self, bad_words: &[S]) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let text = require(&mut errors, "text", &self.text);

        let lowered = text.to_lowercase();
        if bad_words
            .iter()
            .map(|w| w.as_ref().to_lowercase())
            .any(|w| !w.is_empty() && lowered.contains(&w))
        {
            errors.add("text", BAD_WORDS_WARNING);
        }

        errors.into_result(text.to_string())
    }
}
