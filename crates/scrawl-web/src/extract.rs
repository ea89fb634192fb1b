//! Session extractors for the HTML surface.
//!
//! `MaybeUser` never rejects: a missing, invalid, or expired session cookie
//! degrades the request to anonymous. `CurrentUser` rejects anonymous
//! requests with a redirect to the login form, carrying the original
//! destination in the `next` parameter so login can send the browser back.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::response::Redirect;

use scrawl_core::{SessionRepository, User, UserRepository};

use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "scrawl_session";

/// Pull a named cookie value out of the Cookie header(s).
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Resolve the session cookie to its user, swallowing every failure mode
/// into `None`.
async fn lookup_user(headers: &HeaderMap, state: &AppState) -> Option<User> {
    let token = cookie_value(headers, SESSION_COOKIE)?;
    match state.db.sessions.resolve(token).await {
        Ok(Some(session)) => state.db.users.fetch(session.user_id).await.ok(),
        _ => None,
    }
}

/// Extractor for optionally-authenticated requests.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(lookup_user(&parts.headers, state).await))
    }
}

/// Extractor that requires a logged-in user.
///
/// Use this for every route under `/notes`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match lookup_user(&parts.headers, state).await {
            Some(user) => Ok(CurrentUser { user }),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/notes");
                Err(login_redirect(next))
            }
        }
    }
}

/// 303 to the login form, preserving the original destination.
pub fn login_redirect(next: &str) -> Redirect {
    Redirect::to(&format!("/auth/login?next={}", urlencoding::encode(next)))
}
