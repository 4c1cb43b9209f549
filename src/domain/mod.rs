//! Core types: users, notes, news, comments, form validation and ownership

mod news;
mod note;
pub mod policy;
mod user;
mod validation;

pub use news::{
    BAD_WORDS_WARNING, Comment, CommentForm, CommentId, DEFAULT_BAD_WORDS, NEWS_TITLE_MAX_LENGTH,
    NewComment, NewNews, News, NewsId,
};
pub use note::{
    Note, NoteFields, NoteForm, NoteId, SLUG_TAKEN_WARNING, TITLE_MAX_LENGTH, slug_taken_message,
};
pub use policy::{Access, Owned};
pub use user::{
    NewUser, PASSWORD_MIN_LENGTH, SignupForm, USERNAME_MAX_LENGTH, User, UserId, is_valid_username,
};
pub use validation::{FormErrors, REQUIRED};
