//! Account pages: login, logout, signup.

use crate::domain::{FormErrors, SignupForm, User};
use crate::infra::{hash_password, verify_password_or_dummy};
use crate::store::{StoreError, UserRepository};
use crate::web::{AppError, AppState, Viewer, found, urls};
use axum::Router;
use axum::extract::{Form, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use minijinja::context;
use serde::Deserialize;
use tracing::{debug, info};

const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

const USERNAME_TAKEN: &str = "A user with that username already exists.";

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route(urls::LOGIN, get(login_page).post(login))
        .route(urls::LOGOUT, get(logout).post(logout))
        .route(urls::SIGNUP, get(signup_page).post(signup))
}

#[derive(Debug, Deserialize)]
struct NextQuery {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    next: String,
}

fn render_login(
    state: &AppState,
    user: Option<&User>,
    username: &str,
    next: &str,
    errors: &FormErrors,
) -> Result<Html<String>, AppError> {
    state.render(
        "users/login.html",
        user,
        context! { username, next, errors },
    )
}

/// Checks credentials. Unknown users and wrong passwords look the same,
/// including in how long the check takes.
async fn authenticate(state: &AppState, username: &str, password: &str) -> Result<Option<User>, AppError> {
    let user = state.store()?.user_by_username(username.trim())?;

    let password = password.to_string();
    let hash = user.as_ref().map(|u| u.password_hash().to_string());
    let matches =
        tokio::task::spawn_blocking(move || verify_password_or_dummy(&password, hash.as_deref()))
            .await??;
    Ok(user.filter(|_| matches))
}

async fn login_page(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<NextQuery>,
) -> Result<Html<String>, AppError> {
    let next = query.next.unwrap_or_default();
    render_login(&state, viewer.user(), "", &next, &FormErrors::new())
}

async fn login(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(user) = authenticate(&state, &form.username, &form.password).await? else {
        debug!(username = %form.username, "login rejected");
        let errors = FormErrors::single("non_field", BAD_CREDENTIALS);
        let page = render_login(&state, None, &form.username, &form.next, &errors)?;
        return Ok(page.into_response());
    };

    viewer.log_in(&user).await?;
    info!(username = user.username(), "user logged in");

    let target = if urls::is_local_path(&form.next) {
        form.next.as_str()
    } else {
        urls::HOME
    };
    Ok(found(target))
}

async fn logout(State(state): State<AppState>, viewer: Viewer) -> Result<Html<String>, AppError> {
    if let Some(user) = viewer.user() {
        info!(username = user.username(), "user logged out");
    }
    viewer.log_out().await?;
    state.render("users/logout.html", None, context! {})
}

fn render_signup(
    state: &AppState,
    user: Option<&User>,
    form: &SignupForm,
    errors: &FormErrors,
) -> Result<Html<String>, AppError> {
    state.render("users/signup.html", user, context! { form, errors })
}

async fn signup_page(State(state): State<AppState>, viewer: Viewer) -> Result<Html<String>, AppError> {
    render_signup(&state, viewer.user(), &SignupForm::default(), &FormErrors::new())
}

async fn signup(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let new_user = match form.clean() {
        Ok(new_user) => new_user,
        Err(errors) => {
            return Ok(render_signup(&state, viewer.user(), &form, &errors)?.into_response());
        }
    };

    let password = new_user.password.clone();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let created = state.store()?.create_user(&new_user.username, &hash);
    match created {
        Ok(user) => {
            info!(username = user.username(), "account created");
            Ok(found(urls::LOGIN))
        }
        Err(StoreError::DuplicateUsername { .. }) => {
            let errors = FormErrors::single("username", USERNAME_TAKEN);
            Ok(render_signup(&state, viewer.user(), &form, &errors)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}
