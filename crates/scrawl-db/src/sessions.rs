//! Browser session repository implementation.
//!
//! Sessions are addressed by an opaque bearer token. The token is returned
//! exactly once at creation; only its SHA256 hash is stored, so a leaked
//! database dump does not leak usable cookies.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use scrawl_core::{new_v7, Error, IssuedSession, Result, Session, SessionRepository};

use crate::secrets::{generate_secret, hash_secret};

/// Prefix marking session tokens, recognizable in logs and pastes.
const TOKEN_PREFIX: &str = "sc_sess_";

/// Length of the random portion of a session token.
const TOKEN_SECRET_LEN: usize = 48;

/// SQLite implementation of SessionRepository.
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: Pool<Sqlite>,
}

impl SqliteSessionRepository {
    /// Create a new SqliteSessionRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<IssuedSession> {
        let now = Utc::now();
        let expires_at = now + ttl;
        let id = new_v7();
        let token = format!("{}{}", TOKEN_PREFIX, generate_secret(TOKEN_SECRET_LEN));
        let token_hash = hash_secret(&token);

        sqlx::query(
            "INSERT INTO session (id, user_id, token_hash, created_at_utc, expires_at_utc)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(&token_hash)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(IssuedSession {
            session: Session {
                id,
                user_id,
                created_at_utc: now,
                expires_at_utc: expires_at,
            },
            token,
        })
    }

    async fn resolve(&self, token: &str) -> Result<Option<Session>> {
        let token_hash = hash_secret(token);
        let row = sqlx::query(
            "SELECT id, user_id, created_at_utc, expires_at_utc
             FROM session WHERE token_hash = ?",
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let session = Session {
            id: row.get("id"),
            user_id: row.get("user_id"),
            created_at_utc: row.get("created_at_utc"),
            expires_at_utc: row.get("expires_at_utc"),
        };

        if session.expires_at_utc <= Utc::now() {
            // Lazy cleanup; the periodic sweeper handles the rest
            sqlx::query("DELETE FROM session WHERE id = ?")
                .bind(session.id)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn revoke(&self, token: &str) -> Result<bool> {
        let token_hash = hash_secret(token);
        let result = sqlx::query("DELETE FROM session WHERE token_hash = ?")
            .bind(&token_hash)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM session WHERE expires_at_utc <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }
}
