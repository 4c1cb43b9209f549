//! Pages of the notes site.
//!
//! Every page except the landing page needs a login. Detail, edit and delete
//! are additionally owner-gated: a note written by somebody else answers 404.

use crate::domain::{FormErrors, Note, NoteForm, User, policy, slug_taken_message};
use crate::store::{NoteRepository, StoreError};
use crate::web::{AppError, AppState, FormInput, Viewer, found, urls};
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use minijinja::context;
use tracing::{debug, info};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route(urls::HOME, get(home))
        .route(urls::NOTES_LIST, get(list))
        .route(urls::NOTES_ADD, get(add_page).post(add))
        .route(urls::NOTES_SUCCESS, get(success))
        .route(urls::NOTE_DETAIL_ROUTE, get(detail))
        .route(urls::NOTE_EDIT_ROUTE, get(edit_page).post(edit))
        .route(urls::NOTE_DELETE_ROUTE, get(delete_page).post(delete))
}

/// Loads the note at `slug` if `user` owns it.
fn owned_note(state: &AppState, user: &User, slug: &str) -> Result<Note, AppError> {
    let note = state.store()?.note_by_slug(slug)?;
    policy::owned_by(user.id(), note).ok_or_else(|| {
        debug!(slug, viewer = %user.id(), "note hidden from viewer");
        AppError::NotFound
    })
}

fn render_form(
    state: &AppState,
    user: &User,
    form: &NoteForm,
    errors: &FormErrors,
    note: Option<&Note>,
) -> Result<Response, AppError> {
    let action = match note {
        Some(note) => urls::note_edit(note.slug()),
        None => urls::NOTES_ADD.to_string(),
    };
    let page = state.render(
        "notes/form.html",
        Some(user),
        context! { form, errors, note, action },
    )?;
    Ok(page.into_response())
}

async fn home(State(state): State<AppState>, viewer: Viewer) -> Result<Html<String>, AppError> {
    state.render("notes/home.html", viewer.user(), context! {})
}

async fn list(State(state): State<AppState>, viewer: Viewer) -> Result<Html<String>, AppError> {
    let user = viewer.require_user()?;
    let object_list = state.store()?.notes_by_author(user.id())?;
    state.render("notes/list.html", Some(user), context! { object_list })
}

async fn success(State(state): State<AppState>, viewer: Viewer) -> Result<Html<String>, AppError> {
    let user = viewer.require_user()?;
    state.render("notes/success.html", Some(user), context! {})
}

async fn add_page(State(state): State<AppState>, viewer: Viewer) -> Result<Response, AppError> {
    let user = viewer.require_user()?;
    render_form(&state, user, &NoteForm::default(), &FormErrors::new(), None)
}

async fn add(
    State(state): State<AppState>,
    viewer: Viewer,
    form: FormInput<NoteForm>,
) -> Result<Response, AppError> {
    let user = viewer.require_user()?;
    let Form(form) = form?;
    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => return render_form(&state, user, &form, &errors, None),
    };

    let inserted = state.store()?.insert_note(user.id(), &fields);
    match inserted {
        Ok(note) => {
            info!(slug = note.slug(), author = %user.id(), "note created");
            Ok(found(urls::NOTES_SUCCESS))
        }
        Err(StoreError::DuplicateSlug { slug }) => {
            let errors = FormErrors::single("slug", slug_taken_message(&slug));
            render_form(&state, user, &form, &errors, None)
        }
        Err(e) => Err(e.into()),
    }
}

async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let user = viewer.require_user()?;
    let note = owned_note(&state, user, &slug)?;
    state.render("notes/detail.html", Some(user), context! { note })
}

async fn edit_page(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let user = viewer.require_user()?;
    let note = owned_note(&state, user, &slug)?;
    render_form(
        &state,
        user,
        &NoteForm::from_note(&note),
        &FormErrors::new(),
        Some(&note),
    )
}

async fn edit(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
    form: FormInput<NoteForm>,
) -> Result<Response, AppError> {
    let user = viewer.require_user()?;
    let note = owned_note(&state, user, &slug)?;
    let Form(form) = form?;
    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => return render_form(&state, user, &form, &errors, Some(&note)),
    };

    let updated = state.store()?.update_note(note.id(), &fields);
    match updated {
        Ok(updated) => {
            info!(slug = updated.slug(), author = %user.id(), "note updated");
            Ok(found(urls::NOTES_SUCCESS))
        }
        Err(StoreError::DuplicateSlug { slug }) => {
            let errors = FormErrors::single("slug", slug_taken_message(&slug));
            render_form(&state, user, &form, &errors, Some(&note))
        }
        Err(e) => Err(e.into()),
    }
}

async fn delete_page(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let user = viewer.require_user()?;
    let note = owned_note(&state, user, &slug)?;
    state.render("notes/delete.html", Some(user), context! { note })
}

async fn delete(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let user = viewer.require_user()?;
    let note = owned_note(&state, user, &slug)?;
    state.store()?.delete_note(note.id())?;
    info!(slug = note.slug(), author = %user.id(), "note deleted");
    Ok(found(urls::NOTES_SUCCESS))
}
