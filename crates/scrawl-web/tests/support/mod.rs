//! Shared helpers for driving the router in-process.
//!
//! Requests are sent with `tower::ServiceExt::oneshot` against an app
//! backed by an in-memory database, so the full middleware stack runs
//! without binding a socket.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use scrawl_db::test_fixtures::memory_database;
use scrawl_db::Database;
use scrawl_web::{router, AppState};

/// Build the app over a fresh in-memory database.
///
/// Rate limiting is off so request-heavy tests cannot trip it.
pub async fn test_app() -> (Router, Database) {
    let db = memory_database().await;
    let state = AppState {
        db: db.clone(),
        rate_limiter: None,
        session_ttl: chrono::Duration::days(14),
    };
    (router(state), db)
}

/// Cookie header value for a session token.
pub fn session_cookie(token: &str) -> String {
    format!("scrawl_session={}", token)
}

/// Send a GET request, optionally with a session cookie.
pub async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).expect("build request");
    app.clone().oneshot(request).await.expect("send request")
}

/// Send a form POST, optionally with a session cookie.
pub async fn post_form(app: &Router, path: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.clone().oneshot(request).await.expect("send request")
}

/// Read the full response body as UTF-8.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// The Location header of a redirect response.
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .expect("ascii Location header")
}

/// Assert a 303 redirect to the given destination.
pub fn assert_redirect(response: &Response, dest: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), dest);
}
