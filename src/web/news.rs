//! Pages of the news site.

use crate::domain::{
    Comment, CommentForm, CommentId, FormErrors, NewComment, News, NewsId, User, policy,
};
use crate::store::NewsRepository;
use crate::web::{AppError, AppState, FormInput, Viewer, found, urls};
use axum::Router;
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;
use minijinja::context;
use tracing::{debug, info};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route(urls::HOME, get(home))
        .route(urls::NEWS_DETAIL_ROUTE, get(detail).post(comment))
        .route(urls::COMMENT_EDIT_ROUTE, get(edit_page).post(edit))
        .route(
            urls::COMMENT_DELETE_ROUTE,
            get(delete_page).post(delete).delete(delete),
        )
}

/// Parses a path id. Anything that is not a number is simply not found.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

fn load_news(state: &AppState, raw_id: &str) -> Result<News, AppError> {
    let id = NewsId::new(parse_id(raw_id)?);
    state.store()?.news_by_id(id)?.ok_or(AppError::NotFound)
}

/// Loads the comment `raw_id` if `user` wrote it.
fn owned_comment(state: &AppState, user: &User, raw_id: &str) -> Result<Comment, AppError> {
    let id = CommentId::new(parse_id(raw_id)?);
    let comment = state.store()?.comment_by_id(id)?;
    policy::owned_by(user.id(), comment).ok_or_else(|| {
        debug!(comment = %id, viewer = %user.id(), "comment hidden from viewer");
        AppError::NotFound
    })
}

fn render_detail(
    state: &AppState,
    user: Option<&User>,
    news: &News,
    form: &CommentForm,
    errors: &FormErrors,
) -> Result<Html<String>, AppError> {
    let comments = state.store()?.comments_for(news.id)?;
    state.render(
        "news/detail.html",
        user,
        context! { news, comments, form, errors },
    )
}

async fn home(State(state): State<AppState>, viewer: Viewer) -> Result<Html<String>, AppError> {
    let news_list = state.store()?.latest_news(state.settings().news_per_page)?;
    state.render("news/home.html", viewer.user(), context! { news_list })
}

async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let news = load_news(&state, &id)?;
    render_detail(
        &state,
        viewer.user(),
        &news,
        &CommentForm::default(),
        &FormErrors::new(),
    )
}

/// Comment submission. Anonymous posts are dropped and the page renders as usual.
async fn comment(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    form: FormInput<CommentForm>,
) -> Result<Response, AppError> {
    let news = load_news(&state, &id)?;
    let empty_form = CommentForm::default();

    let Some(user) = viewer.user() else {
        debug!(news = %news.id, "anonymous comment ignored");
        let page = render_detail(&state, None, &news, &empty_form, &FormErrors::new())?;
        return Ok(page.into_response());
    };

    let Form(form) = form?;
    let text = match form.clean(state.settings().bad_words.as_slice()) {
        Ok(text) => text,
        Err(errors) => {
            let page = render_detail(&state, Some(user), &news, &form, &errors)?;
            return Ok(page.into_response());
        }
    };

    let comment = state.store()?.insert_comment(&NewComment {
        news: news.id,
        author: user.id(),
        text,
        created: Utc::now(),
    })?;
    info!(comment = %comment.id, news = %news.id, author = %user.id(), "comment created");
    Ok(found(&urls::news_comments(news.id)))
}

async fn edit_page(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let user = viewer.require_user()?;
    let comment = owned_comment(&state, user, &id)?;
    let form = CommentForm {
        text: comment.text.clone(),
    };
    state.render(
        "news/edit.html",
        Some(user),
        context! { comment, form, errors => FormErrors::new() },
    )
}

async fn edit(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    form: FormInput<CommentForm>,
) -> Result<Response, AppError> {
    let user = viewer.require_user()?;
    let comment = owned_comment(&state, user, &id)?;
    let Form(form) = form?;
    let text = match form.clean(state.settings().bad_words.as_slice()) {
        Ok(text) => text,
        Err(errors) => {
            let page = state.render(
                "news/edit.html",
                Some(user),
                context! { comment, form, errors },
            )?;
            return Ok(page.into_response());
        }
    };

    state.store()?.update_comment_text(comment.id, &text)?;
    info!(comment = %comment.id, author = %user.id(), "comment updated");
    Ok(found(&urls::news_comments(comment.news)))
}

async fn delete_page(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let user = viewer.require_user()?;
    let comment = owned_comment(&state, user, &id)?;
    state.render("news/delete.html", Some(user), context! { comment })
}

async fn delete(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let user = viewer.require_user()?;
    let comment = owned_comment(&state, user, &id)?;
    state.store()?.delete_comment(comment.id)?;
    info!(comment = %comment.id, author = %user.id(), "comment deleted");
    Ok(found(&urls::news_comments(comment.news)))
}
