//! Route paths and reverse lookups.
//!
//! Handlers, templates and tests build URLs through this module so a path is
//! spelled in exactly one place.

use crate::domain::{CommentId, NewsId};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is in the `next` query parameter.
const NEXT_PARAM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Landing page of either site; also where login sends users without `next`.
pub const HOME: &str = "/";

pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const SIGNUP: &str = "/auth/signup/";

pub const NOTES_LIST: &str = "/notes/";
pub const NOTES_ADD: &str = "/add/";
pub const NOTES_SUCCESS: &str = "/done/";

pub(crate) const NOTE_DETAIL_ROUTE: &str = "/note/{slug}/";
pub(crate) const NOTE_EDIT_ROUTE: &str = "/edit/{slug}/";
pub(crate) const NOTE_DELETE_ROUTE: &str = "/delete/{slug}/";

pub(crate) const NEWS_DETAIL_ROUTE: &str = "/news/{id}/";
pub(crate) const COMMENT_EDIT_ROUTE: &str = "/edit_comment/{id}/";
pub(crate) const COMMENT_DELETE_ROUTE: &str = "/delete_comment/{id}/";

pub fn note_detail(slug: &str) -> String {
    format!("/note/{slug}/")
}

pub fn note_edit(slug: &str) -> String {
    format!("/edit/{slug}/")
}

pub fn note_delete(slug: &str) -> String {
    format!("/delete/{slug}/")
}

pub fn news_detail(id: NewsId) -> String {
    format!("/news/{id}/")
}

/// News detail page anchored at its comment section.
pub fn news_comments(id: NewsId) -> String {
    format!("{}#comments", news_detail(id))
}

pub fn comment_edit(id: CommentId) -> String {
    format!("/edit_comment/{id}/")
}

pub fn comment_delete(id: CommentId) -> String {
    format!("/delete_comment/{id}/")
}

/// Login page that returns to `next` after signing in.
///
/// ```
/// use yasite::web::urls;
///
/// assert_eq!(urls::login_with_next("/add/"), "/auth/login/?next=/add/");
/// ```
pub fn login_with_next(next: &str) -> String {
    format!("{LOGIN}?next={}", utf8_percent_encode(next, NEXT_PARAM))
}

/// Returns true if `next` is a path on this site.
///
/// Rejects absolute and scheme-relative URLs so the login form cannot be
/// used as an open redirect.
pub fn is_local_path(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')
}

/// Resolves a route name (`notes:edit`, `users:login`, ...) to a path.
///
/// Routes that take a slug or id read it from `arg`. Returns `None` for an
/// unknown name or a missing/invalid argument.
pub fn reverse(name: &str, arg: Option<&str>) -> Option<String> {
    let id = || arg.and_then(|a| a.parse::<i64>().ok());
    let path = match name {
        "notes:home" | "news:home" => HOME.to_string(),
        "notes:list" => NOTES_LIST.to_string(),
        "notes:add" => NOTES_ADD.to_string(),
        "notes:success" => NOTES_SUCCESS.to_string(),
        "notes:detail" => note_detail(arg?),
        "notes:edit" => note_edit(arg?),
        "notes:delete" => note_delete(arg?),
        "news:detail" => news_detail(NewsId::new(id()?)),
        "news:edit" => comment_edit(CommentId::new(id()?)),
        "news:delete" => comment_delete(CommentId::new(id()?)),
        "users:login" => LOGIN.to_string(),
        "users:logout" => LOGOUT.to_string(),
        "users:signup" => SIGNUP.to_string(),
        _ => return None,
    };
    Some(path)
}
