//! Login, logout, and signup handlers.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use scrawl_core::{CreateUserRequest, Error, SessionRepository, UserRepository};

use crate::error::WebError;
use crate::extract::{cookie_value, MaybeUser, SESSION_COOKIE};
use crate::forms::{LoginForm, NextParams, SignupForm};
use crate::views;
use crate::AppState;

/// Message shown for any failed login attempt. It never reveals whether
/// the username exists.
const LOGIN_FAILED: &str = "Your username and password didn't match. Please try again.";

/// Validate a post-login destination. Only local paths are honored;
/// anything else would be an open redirect.
fn safe_next(next: &str) -> Option<&str> {
    if next.starts_with('/') && !next.starts_with("//") {
        Some(next)
    } else {
        None
    }
}

/// Where to send the browser after login or signup.
fn login_destination(next: &str) -> &str {
    safe_next(next).unwrap_or("/notes")
}

/// Set-Cookie value for a fresh session token.
fn session_cookie(token: &str, ttl: chrono::Duration) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl.num_seconds()
    )
}

/// Set-Cookie value that removes the session cookie.
fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// GET /auth/login - login form.
///
/// An already-authenticated user is sent straight to their destination.
pub async fn login_get(MaybeUser(user): MaybeUser, Query(params): Query<NextParams>) -> Response {
    if user.is_some() {
        return Redirect::to(login_destination(&params.next)).into_response();
    }
    Html(views::login_page(&params.next, "", None)).into_response()
}

/// POST /auth/login - authenticate and set the session cookie.
///
/// A failed attempt re-renders the form with a generic message and no
/// cookie.
pub async fn login_post(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let user = state
        .db
        .users
        .verify_credentials(form.username.trim(), &form.password)
        .await?;

    let user = match user {
        Some(user) => user,
        None => {
            return Ok(Html(views::login_page(
                &form.next,
                &form.username,
                Some(LOGIN_FAILED),
            ))
            .into_response());
        }
    };

    let issued = state.db.sessions.create(user.id, state.session_ttl).await?;
    tracing::info!(username = %user.username, "User logged in");

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&issued.token, state.session_ttl),
        )],
        Redirect::to(login_destination(&form.next)),
    )
        .into_response())
}

/// POST /auth/logout - revoke the session and clear the cookie.
pub async fn logout_post(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    if let Some(token) = cookie_value(&headers, SESSION_COOKIE) {
        state.db.sessions.revoke(token).await?;
    }
    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/auth/login"),
    )
        .into_response())
}

/// GET /auth/signup - registration form.
pub async fn signup_get(MaybeUser(user): MaybeUser, Query(params): Query<NextParams>) -> Response {
    if user.is_some() {
        return Redirect::to(login_destination(&params.next)).into_response();
    }
    Html(views::signup_page(&params.next, "", None)).into_response()
}

/// POST /auth/signup - create the account and log it straight in.
pub async fn signup_post(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, WebError> {
    if let Err(e) = form.validate() {
        return signup_with_error(&form, e);
    }

    let created = state
        .db
        .users
        .create(CreateUserRequest {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        })
        .await;

    let user = match created {
        Ok(user) => user,
        Err(e @ Error::Validation { .. }) => return signup_with_error(&form, e),
        Err(e) => return Err(e.into()),
    };

    let issued = state.db.sessions.create(user.id, state.session_ttl).await?;
    tracing::info!(username = %user.username, "Account created");

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&issued.token, state.session_ttl),
        )],
        Redirect::to(login_destination(&form.next)),
    )
        .into_response())
}

/// Re-render the signup form with a field error.
fn signup_with_error(form: &SignupForm, err: Error) -> Result<Response, WebError> {
    match err {
        Error::Validation { field, message } => Ok(Html(views::signup_page(
            &form.next,
            &form.username,
            Some((&field, &message)),
        ))
        .into_response()),
        other => Err(other.into()),
    }
}
