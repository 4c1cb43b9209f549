//! In-process application with an in-memory database.

// Allow dead code since not every test file uses every helper
#![allow(dead_code)]

use super::TestClient;
use axum::Router;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::MutexGuard;
use yasite::domain::{Comment, NewComment, NewNews, News, Note, NoteFields, User};
use yasite::infra::hash_password;
use yasite::store::{NewsRepository, NoteRepository, SqliteStore, UserRepository};
use yasite::web::{AppState, Settings, Site, router};

/// Password given to every account created through [`TestApp::create_user`].
pub const PASSWORD: &str = "correct-horse";

/// One site with a fresh in-memory database.
///
/// The router is built once so every client shares the same session store.
pub struct TestApp {
    state: AppState,
    router: Router,
}

impl TestApp {
    /// The notes site with default settings.
    pub fn notes() -> Self {
        Self::with_settings(Site::Notes, Settings::default())
    }

    /// The news site with default settings.
    pub fn news() -> Self {
        Self::with_settings(Site::News, Settings::default())
    }

    pub fn with_settings(site: Site, settings: Settings) -> Self {
        let store = SqliteStore::open_in_memory().expect("Failed to open in-memory store");
        let state = AppState::new(site, store, settings).expect("Failed to load templates");
        let router = router(state.clone());
        Self { state, router }
    }

    /// Locks the shared store for direct setup and assertions.
    pub fn store(&self) -> MutexGuard<'_, SqliteStore> {
        self.state.store().expect("Store lock poisoned")
    }

    /// Creates an account whose password is [`PASSWORD`].
    pub fn create_user(&self, username: &str) -> User {
        let hash = hash_password(PASSWORD).expect("Failed to hash password");
        self.store()
            .create_user(username, &hash)
            .expect("Failed to create user")
    }

    /// An anonymous client.
    pub fn client(&self) -> TestClient {
        TestClient::new(self.router.clone())
    }

    /// A client signed in as `user` through the login page.
    pub async fn login(&self, user: &User) -> TestClient {
        let mut client = self.client();
        let response = client
            .post_form(
                "/auth/login/",
                &[("username", user.username()), ("password", PASSWORD)],
            )
            .await;
        assert_eq!(
            response.location(),
            Some("/"),
            "login as {} should redirect home",
            user.username()
        );
        client
    }

    // ===========================================
    // Record Shortcuts
    // ===========================================

    pub fn add_note(&self, author: &User, title: &str, slug: &str) -> Note {
        let fields = NoteFields {
            title: title.to_string(),
            text: format!("Text of {title}"),
            slug: slug.to_string(),
        };
        self.store()
            .insert_note(author.id(), &fields)
            .expect("Failed to insert note")
    }

    pub fn add_news(&self, title: &str, date: NaiveDate) -> News {
        let news = NewNews::new(title, format!("Text of {title}"), date).expect("Invalid news");
        self.store().insert_news(&news).expect("Failed to insert news")
    }

    pub fn add_comment(&self, news: &News, author: &User, text: &str, created: DateTime<Utc>) -> Comment {
        self.store()
            .insert_comment(&NewComment {
                news: news.id,
                author: author.id(),
                text: text.to_string(),
                created,
            })
            .expect("Failed to insert comment")
    }
}
