//! HTTP layer: routers for the notes and news sites

mod error;
mod news;
mod notes;
pub mod session;
mod templates;
pub mod urls;
mod users;

pub use error::{AppError, found, not_found};
pub use session::{SESSION_USER_ID_KEY, Viewer};
pub use templates::Templates;

use crate::domain::{DEFAULT_BAD_WORDS, User};
use crate::store::SqliteStore;
use axum::Router;
use axum::extract::Form;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use clap::ValueEnum;
use minijinja::{Value, context};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// A form body whose rejection is held back until the handler has checked
/// login and ownership.
pub(crate) type FormInput<T> = Result<Form<T>, FormRejection>;

/// Which of the two applications a server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Site {
    /// Private notes
    Notes,
    /// Public news with comments
    News,
}

impl Site {
    pub fn name(self) -> &'static str {
        match self {
            Site::Notes => "notes",
            Site::News => "news",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted session lifetimes in days.
pub const SESSION_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

/// Runtime knobs for the web layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// How many news items the news home page shows.
    pub news_per_page: usize,
    /// Words that get a comment rejected.
    pub bad_words: Vec<String>,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure_cookies: bool,
    /// Session lifetime after the last request, in days.
    pub session_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_per_page: 10,
            bad_words: DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect(),
            secure_cookies: false,
            session_days: 7,
        }
    }
}

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    site: Site,
    store: Arc<Mutex<SqliteStore>>,
    templates: Arc<Templates>,
    settings: Arc<Settings>,
}

impl AppState {
    /// Builds the state for `site`, compiling the page templates.
    pub fn new(site: Site, store: SqliteStore, settings: Settings) -> Result<Self, minijinja::Error> {
        Ok(Self {
            site,
            store: Arc::new(Mutex::new(store)),
            templates: Arc::new(Templates::load()?),
            settings: Arc::new(settings),
        })
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Locks the store.
    ///
    /// Never hold the guard across an `.await`.
    pub fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, AppError> {
        self.store.lock().map_err(|_| AppError::Poisoned)
    }

    /// Renders a page for `user` (`None` for anonymous viewers).
    pub fn render(&self, name: &str, user: Option<&User>, ctx: Value) -> Result<Html<String>, AppError> {
        let ctx = context! {
            site => self.site.name(),
            user => user,
            ..ctx
        };
        Ok(Html(self.templates.render(name, ctx)?))
    }
}

/// Builds the full router for the state's site: site pages, account pages,
/// sessions and request tracing.
pub fn router(state: AppState) -> Router {
    let settings = state.settings();
    let session_days = settings
        .session_days
        .clamp(*SESSION_DAYS_RANGE.start(), *SESSION_DAYS_RANGE.end());
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(settings.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(session_days)));

    let pages = match state.site() {
        Site::Notes => notes::routes(),
        Site::News => news::routes(),
    };

    pages
        .merge(users::routes())
        .fallback(not_found)
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
