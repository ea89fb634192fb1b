//! Test fixtures for database integration tests.
//!
//! Provides reusable setup functions and test data builders for consistent
//! testing across the codebase. Everything runs against an in-memory SQLite
//! database, so no external service is required.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scrawl_db::test_fixtures::{memory_database, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let db = memory_database().await;
//!     let data = TestDataBuilder::new(&db)
//!         .with_user("author")
//!         .with_note("author", "Заголовок", "Текст заметки", Some("note-slug"))
//!         .build()
//!         .await;
//!
//!     // Run your tests...
//! }
//! ```

use std::collections::HashMap;

use chrono::Duration;

use scrawl_core::{
    CreateNoteRequest, CreateUserRequest, Note, NoteRepository, SessionRepository, User,
    UserRepository,
};

#[cfg(feature = "migrations")]
use crate::pool::{create_pool_with_config, PoolConfig};
use crate::Database;

/// Password shared by all fixture users.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Create a migrated in-memory database.
///
/// The pool is pinned to one never-reaped connection; every fresh handle to
/// a `:memory:` database otherwise sees its own empty copy.
#[cfg(feature = "migrations")]
pub async fn memory_database() -> Database {
    let config = PoolConfig::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None);

    let pool = create_pool_with_config("sqlite::memory:", config)
        .await
        .expect("Failed to create in-memory pool");

    let db = Database::new(pool);
    db.migrate().await.expect("Failed to run migrations");
    db
}

/// Test data created by [`TestDataBuilder::build`].
pub struct TestData {
    /// Users by username.
    pub users: HashMap<String, User>,
    /// Notes in insertion order.
    pub notes: Vec<Note>,
}

impl TestData {
    /// Look up a fixture user by username.
    pub fn user(&self, username: &str) -> &User {
        self.users
            .get(username)
            .unwrap_or_else(|| panic!("Unknown fixture user {}", username))
    }
}

/// Builder for assembling the users and notes behind a test.
pub struct TestDataBuilder<'a> {
    db: &'a Database,
    users: Vec<String>,
    notes: Vec<(String, String, String, Option<String>)>,
}

impl<'a> TestDataBuilder<'a> {
    /// Start a builder against the given database.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            users: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Register a user with the shared test password.
    pub fn with_user(mut self, username: &str) -> Self {
        self.users.push(username.to_string());
        self
    }

    /// Add a note owned by a previously added user.
    pub fn with_note(
        mut self,
        username: &str,
        title: &str,
        text: &str,
        slug: Option<&str>,
    ) -> Self {
        self.notes.push((
            username.to_string(),
            title.to_string(),
            text.to_string(),
            slug.map(str::to_string),
        ));
        self
    }

    /// Create everything registered so far.
    pub async fn build(self) -> TestData {
        let mut users = HashMap::new();
        for username in &self.users {
            let user = self
                .db
                .users
                .create(CreateUserRequest {
                    username: username.clone(),
                    password: TEST_PASSWORD.to_string(),
                })
                .await
                .expect("Failed to create fixture user");
            users.insert(username.clone(), user);
        }

        let mut notes = Vec::new();
        for (username, title, text, slug) in self.notes {
            let author = users
                .get(&username)
                .unwrap_or_else(|| panic!("Unknown fixture user {}", username));
            let note = self
                .db
                .notes
                .insert(CreateNoteRequest {
                    author_id: author.id,
                    title,
                    text,
                    slug,
                })
                .await
                .expect("Failed to create fixture note");
            notes.push(note);
        }

        TestData { users, notes }
    }
}

/// Issue a session for a user and return the plaintext token.
pub async fn login_token(db: &Database, user: &User) -> String {
    db.sessions
        .create(user.id, Duration::days(14))
        .await
        .expect("Failed to create fixture session")
        .token
}
