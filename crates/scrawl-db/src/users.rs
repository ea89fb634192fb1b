//! User account repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use scrawl_core::{new_v7, CreateUserRequest, Error, Result, User, UserRepository};

use crate::secrets::{generate_secret, hash_password};

/// Length of the random password salt.
const SALT_LEN: usize = 16;

/// SQLite implementation of UserRepository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: Pool<Sqlite>,
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        created_at_utc: row.get("created_at_utc"),
    }
}

impl SqliteUserRepository {
    /// Create a new SqliteUserRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, req: CreateUserRequest) -> Result<User> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(Error::validation("username", "may not be empty"));
        }

        let now = Utc::now();
        let id = new_v7();
        let salt = generate_secret(SALT_LEN);
        let password_hash = hash_password(&salt, &req.password);

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM user WHERE username = ?)")
                .bind(username)
                .fetch_one(&mut *tx)
                .await
                .map_err(Error::Database)?;
        if taken {
            return Err(Error::validation(
                "username",
                format!("the username {} is already taken", username),
            ));
        }

        sqlx::query(
            "INSERT INTO user (id, username, password_salt, password_hash, created_at_utc)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(username)
        .bind(&salt)
        .bind(&password_hash)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        Ok(User {
            id,
            username: username.to_string(),
            created_at_utc: now,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<User> {
        let row = sqlx::query("SELECT id, username, created_at_utc FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(|r| user_from_row(&r))
            .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))
    }

    async fn fetch_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, created_at_utc FROM user WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(|r| user_from_row(&r)))
    }

    async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, password_salt, password_hash, created_at_utc
             FROM user WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let salt: String = row.get("password_salt");
        let stored: String = row.get("password_hash");
        if hash_password(&salt, password) != stored {
            return Ok(None);
        }

        Ok(Some(user_from_row(&row)))
    }
}
