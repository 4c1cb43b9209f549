//! Private notes addressed by a unique slug.

use crate::domain::policy::Owned;
use crate::domain::validation::{FormErrors, max_chars, require};
use crate::domain::UserId;
use crate::infra::{SLUG_MAX_LENGTH, derive_slug, is_valid_slug};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum note title length.
pub const TITLE_MAX_LENGTH: usize = 100;

/// Suffix of the form error shown when a slug is already taken.
pub const SLUG_TAKEN_WARNING: &str = " - such slug already exists, choose a unique value!";

/// Builds the full "slug taken" message for `slug`.
pub fn slug_taken_message(slug: &str) -> String {
    format!("{slug}{SLUG_TAKEN_WARNING}")
}

/// Database identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note owned by the user who wrote it.
///
/// The author is fixed at creation. Updates go through [`NoteFields`], which
/// has no author, so ownership cannot be reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    id: NoteId,
    title: String,
    text: String,
    slug: String,
    author: UserId,
}

impl Note {
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        text: impl Into<String>,
        slug: impl Into<String>,
        author: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
            author,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn author(&self) -> UserId {
        self.author
    }
}

impl Owned for Note {
    fn owner(&self) -> UserId {
        self.author
    }
}

/// The editable part of a note, after validation.
///
/// `slug` is always set: either what the user typed or the slug derived from
/// the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub text: String,
    pub slug: String,
}

/// Raw note form input as posted by the add and edit pages.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteForm {
    /// Prefills the form from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            text: note.text().to_string(),
            slug: note.slug().to_string(),
        }
    }

    /// Validates the input and fills in a derived slug when none was given.
    ///
    /// Slug uniqueness is enforced by the store, which reports a collision
    /// as [`crate::store::StoreError::DuplicateSlug`].
    pub fn clean(&self) -> Result<NoteFields, FormErrors> {
        let mut errors = FormErrors::new();

        let title = require(&mut errors, "title", &self.title);
        max_chars(&mut errors, "title", title, TITLE_MAX_LENGTH);

        let text = require(&mut errors, "text", &self.text);

        let typed = self.slug.trim();
        let slug = if typed.is_empty() {
            let derived = derive_slug(title);
            if derived.is_empty() && !title.is_empty() {
                errors.add(
                    "slug",
                    "Could not derive a slug from the title; enter one explicitly.",
                );
            }
            derived
        } else {
            max_chars(&mut errors, "slug", typed, SLUG_MAX_LENGTH);
            if !is_valid_slug(typed) {
                errors.add(
                    "slug",
                    "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
                );
            }
            typed.to_string()
        };

        errors.into_result(NoteFields {
            title: title.to_string(),
            text: text.to_string(),
            slug,
        })
    }
}
