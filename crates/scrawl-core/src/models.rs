//! Core data models for scrawl.
//!
//! These types are shared across all scrawl crates and represent the
//! core domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// USER TYPES
// =============================================================================

/// A registered account.
///
/// Credential material (salt, password hash) stays in the database layer
/// and is never attached to this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at_utc: DateTime<Utc>,
}

/// Request for creating a user account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

// =============================================================================
// SESSION TYPES
// =============================================================================

/// An authenticated browser session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at_utc: DateTime<Utc>,
    pub expires_at_utc: DateTime<Utc>,
}

/// A freshly issued session together with its plaintext token.
///
/// The token exists only on this struct; the database stores its hash.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// A note owned by a single author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    /// Explicit slug; derived from the title when absent.
    pub slug: Option<String>,
}

/// Request for updating an existing note.
#[derive(Debug, Clone)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub text: String,
    /// Explicit slug; derived from the new title when absent.
    pub slug: Option<String>,
}
