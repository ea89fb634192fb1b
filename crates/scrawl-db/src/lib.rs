//! # scrawl-db
//!
//! SQLite database layer for scrawl.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for users, sessions, and notes
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use scrawl_db::{CreateNoteRequest, Database, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://scrawl.db").await?;
//!     db.migrate().await?;
//!
//!     let note = db.notes.insert(CreateNoteRequest {
//!         author_id: author.id,
//!         title: "Hello".to_string(),
//!         text: "First note".to_string(),
//!         slug: None,
//!     }).await?;
//!
//!     println!("Created note: {}", note.slug);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;
mod secrets;
pub mod sessions;
pub mod users;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use them
pub mod test_fixtures;

// Re-export core types
pub use scrawl_core::*;

// Re-export repository implementations
pub use notes::SqliteNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use sessions::SqliteSessionRepository;
pub use users::SqliteUserRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Sqlite>,
    /// Note repository for CRUD operations.
    pub notes: SqliteNoteRepository,
    /// User account repository.
    pub users: SqliteUserRepository,
    /// Browser session repository.
    pub sessions: SqliteSessionRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        Self {
            notes: SqliteNoteRepository::new(pool.clone()),
            users: SqliteUserRepository::new(pool.clone()),
            sessions: SqliteSessionRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        &self.pool
    }
}
