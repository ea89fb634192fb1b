//! Note repository implementation.
//!
//! All slug lookups are owner-scoped, so a note that belongs to someone
//! else is indistinguishable from a note that does not exist. Slug
//! uniqueness is checked inside the write transaction and surfaces as a
//! field-level validation error, never as a constraint violation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, Transaction};
use uuid::Uuid;

use scrawl_core::{
    new_v7, resolve_slug, CreateNoteRequest, Error, Note, NoteRepository, Result,
    UpdateNoteRequest,
};

/// SQLite implementation of NoteRepository.
#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: Pool<Sqlite>,
}

fn note_from_row(row: &SqliteRow) -> Note {
    Note {
        id: row.get("id"),
        author_id: row.get("author_id"),
        title: row.get("title"),
        text: row.get("text"),
        slug: row.get("slug"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
    }
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn slug_taken_tx(
        tx: &mut Transaction<'_, Sqlite>,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let taken: bool = match exclude {
            Some(id) => {
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM note WHERE slug = ? AND id != ?)")
                    .bind(slug)
                    .bind(id)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(Error::Database)?
            }
            None => sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM note WHERE slug = ?)")
                .bind(slug)
                .fetch_one(&mut **tx)
                .await
                .map_err(Error::Database)?,
        };
        Ok(taken)
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note> {
        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        if Self::slug_taken_tx(&mut tx, &slug, None).await? {
            return Err(Error::slug_taken(&slug));
        }

        let now = Utc::now();
        let id = new_v7();
        sqlx::query(
            "INSERT INTO note (id, author_id, title, text, slug, created_at_utc, updated_at_utc)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(req.author_id)
        .bind(&req.title)
        .bind(&req.text)
        .bind(&slug)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        Ok(Note {
            id,
            author_id: req.author_id,
            title: req.title,
            text: req.text,
            slug,
            created_at_utc: now,
            updated_at_utc: now,
        })
    }

    async fn fetch_owned(&self, slug: &str, author_id: Uuid) -> Result<Note> {
        let row = sqlx::query(
            "SELECT id, author_id, title, text, slug, created_at_utc, updated_at_utc
             FROM note WHERE slug = ? AND author_id = ?",
        )
        .bind(slug)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(|r| note_from_row(&r))
            .ok_or_else(|| Error::NoteNotFound(slug.to_string()))
    }

    async fn list_for_author(&self, author_id: Uuid) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT id, author_id, title, text, slug, created_at_utc, updated_at_utc
             FROM note WHERE author_id = ?
             ORDER BY created_at_utc DESC, id DESC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM note WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;
        if !exists {
            return Err(Error::NotFound(format!("Note {} not found", id)));
        }

        if Self::slug_taken_tx(&mut tx, &slug, Some(id)).await? {
            return Err(Error::slug_taken(&slug));
        }

        let now = Utc::now();
        sqlx::query("UPDATE note SET title = ?, text = ?, slug = ?, updated_at_utc = ? WHERE id = ?")
            .bind(&req.title)
            .bind(&req.text)
            .bind(&slug)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let row = sqlx::query(
            "SELECT id, author_id, title, text, slug, created_at_utc, updated_at_utc
             FROM note WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        Ok(note_from_row(&row))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Note {} not found", id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM note")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(count)
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let taken = Self::slug_taken_tx(&mut tx, slug, exclude).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(taken)
    }
}
