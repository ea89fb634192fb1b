//! Repository traits for scrawl storage backends.
//!
//! These traits define the persistence interfaces, enabling pluggable
//! backends and testability.

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note CRUD operations.
///
/// Fetching by slug is always owner-scoped: a caller asking for a note it
/// does not own gets `Error::NoteNotFound`, never a forbidden error, so the
/// existence of other users' slugs is not observable.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, deriving the slug from the title when absent.
    ///
    /// A colliding slug fails with the field-level validation error built
    /// by `Error::slug_taken`, not with a database constraint error.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Fetch a note by slug, scoped to its author.
    async fn fetch_owned(&self, slug: &str, author_id: Uuid) -> Result<Note>;

    /// List all notes belonging to one author, newest first.
    async fn list_for_author(&self, author_id: Uuid) -> Result<Vec<Note>>;

    /// Update title, text, and slug of an existing note.
    ///
    /// The uniqueness check excludes the note itself, so keeping the
    /// current slug is always allowed.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Permanently delete a note.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Count all notes across all authors.
    async fn count(&self) -> Result<i64>;

    /// Check whether a slug is taken, optionally excluding one note.
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool>;
}

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Repository for account management and credential checks.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create an account, storing a salted password hash.
    ///
    /// A taken username fails with a field-level validation error.
    async fn create(&self, req: CreateUserRequest) -> Result<User>;

    /// Fetch a user by ID.
    async fn fetch(&self, id: Uuid) -> Result<User>;

    /// Fetch a user by username.
    async fn fetch_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Verify a username/password pair.
    ///
    /// Returns `None` for both unknown usernames and wrong passwords; the
    /// caller cannot distinguish the two.
    async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>>;
}

// =============================================================================
// SESSION REPOSITORY
// =============================================================================

/// Repository for browser session tokens.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Issue a session for a user.
    ///
    /// The plaintext token is returned exactly once; only its hash is
    /// stored.
    async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<IssuedSession>;

    /// Resolve a token to its session, if valid and unexpired.
    async fn resolve(&self, token: &str) -> Result<Option<Session>>;

    /// Revoke a session by token. Returns whether a session was removed.
    async fn revoke(&self, token: &str) -> Result<bool>;

    /// Delete all expired sessions, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64>;
}
