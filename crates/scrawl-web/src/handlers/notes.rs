//! Note CRUD handlers: list, detail, add, edit, delete.
//!
//! Every route here except the landing page requires a logged-in user.
//! Ownership of a note is enforced by `fetch_owned`, which returns
//! not-found for other users' notes, so non-owners cannot tell a foreign
//! slug from a missing one.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use scrawl_core::{CreateNoteRequest, Error, NoteRepository, UpdateNoteRequest};

use crate::error::WebError;
use crate::extract::{CurrentUser, MaybeUser};
use crate::forms::NoteForm;
use crate::views;
use crate::AppState;

/// GET / - public landing page.
pub async fn home(MaybeUser(user): MaybeUser) -> Html<String> {
    Html(views::landing_page(user.as_ref()))
}

/// GET /notes - the current user's notes, newest first.
pub async fn list_notes(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Html<String>, WebError> {
    let notes = state.db.notes.list_for_author(current.user.id).await?;
    Ok(Html(views::list_page(&current.user, &notes)))
}

/// GET /notes/:slug - detail view, owner only.
pub async fn get_note(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    let note = state.db.notes.fetch_owned(&slug, current.user.id).await?;
    Ok(Html(views::detail_page(&current.user, &note)))
}

/// GET /notes/add - blank note form.
pub async fn add_note_get(current: CurrentUser) -> Html<String> {
    Html(views::note_form_page(
        &current.user,
        "Add a note",
        "/notes/add",
        &NoteForm::default(),
        None,
    ))
}

/// POST /notes/add - create a note owned by the current user.
///
/// Validation failures (including a taken slug) re-render the form with
/// the field error and create nothing.
pub async fn add_note_post(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<NoteForm>,
) -> Result<Response, WebError> {
    if let Err(e) = form.validate() {
        return form_with_error(&current, "Add a note", "/notes/add", &form, e);
    }

    let req = CreateNoteRequest {
        author_id: current.user.id,
        title: form.title.trim().to_string(),
        text: form.text.clone(),
        slug: form.slug_input(),
    };

    match state.db.notes.insert(req).await {
        Ok(note) => {
            tracing::info!(slug = %note.slug, "Note created");
            Ok(Redirect::to("/notes/done").into_response())
        }
        Err(e @ Error::Validation { .. }) => {
            form_with_error(&current, "Add a note", "/notes/add", &form, e)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /notes/:slug/edit - edit form, pre-filled from the note.
pub async fn edit_note_get(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    let note = state.db.notes.fetch_owned(&slug, current.user.id).await?;
    let action = format!("/notes/{}/edit", note.slug);
    Ok(Html(views::note_form_page(
        &current.user,
        "Edit note",
        &action,
        &NoteForm::from_note(&note),
        None,
    )))
}

/// POST /notes/:slug/edit - update a note.
///
/// The ownership check runs before validation: a non-owner gets 404 and
/// never sees a validation message.
pub async fn edit_note_post(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(slug): Path<String>,
    Form(form): Form<NoteForm>,
) -> Result<Response, WebError> {
    let note = state.db.notes.fetch_owned(&slug, current.user.id).await?;
    let action = format!("/notes/{}/edit", note.slug);

    if let Err(e) = form.validate() {
        return form_with_error(&current, "Edit note", &action, &form, e);
    }

    let req = UpdateNoteRequest {
        title: form.title.trim().to_string(),
        text: form.text.clone(),
        slug: form.slug_input(),
    };

    match state.db.notes.update(note.id, req).await {
        Ok(updated) => {
            tracing::info!(slug = %updated.slug, "Note updated");
            Ok(Redirect::to("/notes/done").into_response())
        }
        Err(e @ Error::Validation { .. }) => {
            form_with_error(&current, "Edit note", &action, &form, e)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /notes/:slug/delete - delete confirmation page.
pub async fn delete_note_get(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, WebError> {
    let note = state.db.notes.fetch_owned(&slug, current.user.id).await?;
    Ok(Html(views::delete_page(&current.user, &note)))
}

/// POST /notes/:slug/delete - delete after the ownership check.
pub async fn delete_note_post(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let note = state.db.notes.fetch_owned(&slug, current.user.id).await?;
    state.db.notes.delete(note.id).await?;
    tracing::info!(slug = %note.slug, "Note deleted");
    Ok(Redirect::to("/notes/done").into_response())
}

/// GET /notes/done - post-save landing page.
pub async fn success_page(current: CurrentUser) -> Html<String> {
    Html(views::success_page(&current.user))
}

/// Re-render the note form with a field error, keeping the submitted
/// values. Non-validation errors propagate.
fn form_with_error(
    current: &CurrentUser,
    heading: &str,
    action: &str,
    form: &NoteForm,
    err: Error,
) -> Result<Response, WebError> {
    match err {
        Error::Validation { field, message } => Ok(Html(views::note_form_page(
            &current.user,
            heading,
            action,
            form,
            Some((&field, &message)),
        ))
        .into_response()),
        other => Err(other.into()),
    }
}
