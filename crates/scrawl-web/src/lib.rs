//! scrawl-web - HTTP server for scrawl.
//!
//! Serves the HTML surface (notes CRUD behind a session login) and a JSON
//! health endpoint. Router construction lives here so integration tests
//! can drive the application in-process.

pub mod error;
pub mod extract;
pub mod forms;
pub mod handlers;
pub mod views;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use governor::RateLimiter;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use scrawl_db::Database;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Global rate limiter type (direct quota, no keyed bucketing for a
/// personal server).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
    /// Lifetime of newly issued sessions.
    pub session_ttl: chrono::Duration,
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with the full middleware stack.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Public landing page
        .route("/", get(handlers::notes::home))
        // Notes
        .route("/notes", get(handlers::notes::list_notes))
        .route(
            "/notes/add",
            get(handlers::notes::add_note_get).post(handlers::notes::add_note_post),
        )
        .route("/notes/done", get(handlers::notes::success_page))
        .route("/notes/:slug", get(handlers::notes::get_note))
        .route(
            "/notes/:slug/edit",
            get(handlers::notes::edit_note_get).post(handlers::notes::edit_note_post),
        )
        .route(
            "/notes/:slug/delete",
            get(handlers::notes::delete_note_get).post(handlers::notes::delete_note_post),
        )
        // Accounts
        .route(
            "/auth/login",
            get(handlers::auth::login_get).post(handlers::auth::login_post),
        )
        .route("/auth/logout", post(handlers::auth::logout_post))
        .route(
            "/auth/signup",
            get(handlers::auth::signup_get).post(handlers::auth::signup_post),
        )
        // Unknown paths get the styled 404
        .fallback(not_found)
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        // Form submissions only; cap request bodies at 64 KB
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

// =============================================================================
// RATE LIMITING MIDDLEWARE
// =============================================================================

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // If rate limiting is disabled, pass through
    if let Some(limiter) = &state.rate_limiter {
        // Check rate limit
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::not_found_page()))
}
