//! Session-backed identity of the requester.

use crate::domain::{User, UserId};
use crate::store::UserRepository;
use crate::web::{AppError, AppState};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

/// Key for storing the user ID in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The (possibly anonymous) user behind a request.
///
/// Extracted from the session cookie on every request. A session pointing at
/// a deleted account is treated as anonymous.
pub struct Viewer {
    session: Session,
    user: Option<User>,
    path: String,
}

impl Viewer {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The signed-in user, or a redirect to the login page that returns here.
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user.as_ref().ok_or_else(|| AppError::LoginRequired {
            next: self.path.clone(),
        })
    }

    /// Binds the session to `user`, issuing a fresh session id.
    pub async fn log_in(&self, user: &User) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_USER_ID_KEY, user.id().get())
            .await?;
        Ok(())
    }

    /// Drops all session data.
    pub async fn log_out(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::SessionLayer(message))?;

        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let user = match session.get::<i64>(SESSION_USER_ID_KEY).await? {
            Some(id) => state.store()?.user_by_id(UserId::new(id))?,
            None => None,
        };

        Ok(Self {
            session,
            user,
            path,
        })
    }
}
