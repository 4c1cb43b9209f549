//! Web-layer error type and its HTTP mapping.

use crate::infra::PasswordError;
use crate::store::StoreError;
use crate::web::urls;
use axum::extract::rejection::FormRejection;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Errors a request handler can end with.
///
/// `NotFound` and `LoginRequired` are ordinary outcomes of the access rules,
/// and `Form` answers with axum's own 4xx. Every other variant is a server
/// fault and is logged before answering 500.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing record, or a record the viewer does not own.
    #[error("not found")]
    NotFound,

    /// Anonymous viewer on a page that needs a login.
    #[error("login required to access {next}")]
    LoginRequired { next: String },

    /// Unreadable form body. Only raised after the login and owner checks.
    #[error(transparent)]
    Form(#[from] FormRejection),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("session layer missing: {0}")]
    SessionLayer(&'static str),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("store lock poisoned")]
    Poisoned,
}

/// A 302 response pointing at `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html><html><head><title>Not Found</title></head>\
<body><h1>Not Found</h1><p>The requested resource was not found on this server.</p></body></html>";

/// Fallback handler for unmatched paths.
pub async fn not_found() -> Response {
    AppError::NotFound.into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
            AppError::LoginRequired { next } => found(&urls::login_with_next(&next)),
            AppError::Form(rejection) => rejection.into_response(),
            other => {
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
