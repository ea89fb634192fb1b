//! Web-layer error handling.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use crate::views;

/// Errors surfaced to the browser as HTML pages.
///
/// Field-level validation failures never reach this type: handlers turn
/// those back into a re-rendered form with a 200 status. What remains is
/// not-found (including the ownership masking on note routes), bad input
/// outside any form flow, and storage failures.
#[derive(Debug)]
pub enum WebError {
    Database(scrawl_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<scrawl_core::Error> for WebError {
    fn from(err: scrawl_core::Error) -> Self {
        match &err {
            scrawl_core::Error::NotFound(msg) => WebError::NotFound(msg.clone()),
            scrawl_core::Error::NoteNotFound(slug) => {
                WebError::NotFound(format!("Note not found: {}", slug))
            }
            scrawl_core::Error::Validation { field, message } => {
                WebError::BadRequest(format!("{}: {}", field, message))
            }
            scrawl_core::Error::InvalidInput(msg) => WebError::BadRequest(msg.clone()),
            _ => WebError::Database(err),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        match self {
            WebError::NotFound(detail) => {
                tracing::debug!(%detail, "Responding 404");
                (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
            }
            WebError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Html(views::error_page("Bad request", &message)),
            )
                .into_response(),
            WebError::Database(err) => {
                tracing::error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page(
                        "Server error",
                        "Something went wrong. Please try again.",
                    )),
                )
                    .into_response()
            }
        }
    }
}
