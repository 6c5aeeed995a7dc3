//! # PostgreSQL backend
//!
//! [`PgStore`] owns a `sqlx` connection pool. Unlike a process-wide singleton,
//! the pool is created by [`PgStore::connect`], handed to whoever needs it, and
//! drained explicitly with [`PgStore::close`].
//!
//! Migrations under `migrations/` are embedded at compile time and applied on
//! connect. The `users.username` `UNIQUE` constraint is what enforces username
//! uniqueness; a violation surfaces as [`StoreError::Duplicate`].

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewNote, NewUser, Note, NoteUpdate, User};
use crate::repo::{NoteStore, StoreError, UserStore};

const USER_COLUMNS: &str = "id, username, name, password_hash, created_at";
const NOTE_COLUMNS: &str = "id, content, date, important, user_id";

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(Box::new(e))
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Database(Box::new(e))
    }
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool and bring the schema up to date.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database schema up to date");

        Ok(Self { pool })
    }

    /// Wrap an existing pool without running migrations.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, name, password_hash) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Duplicate {
                    field: "username",
                    value: user.username,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"))
                .fetch_all(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        Ok(sqlx::query_as(&format!(
            "INSERT INTO notes (id, content, important, user_id) VALUES ($1, $2, $3, $4) RETURNING {NOTE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&note.content)
        .bind(note.important)
        .bind(note.owner)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Ok(
            sqlx::query_as(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY date"))
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn find(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        Ok(
            sqlx::query_as(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<Option<Note>, StoreError> {
        Ok(sqlx::query_as(&format!(
            "UPDATE notes SET content = COALESCE($2, content), important = COALESCE($3, important)
             WHERE id = $1 RETURNING {NOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.content)
        .bind(update.important)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ids_by_owner(&self, owner: Uuid) -> Result<Vec<Uuid>, StoreError> {
        Ok(
            sqlx::query_scalar("SELECT id FROM notes WHERE user_id = $1 ORDER BY date")
                .bind(owner)
                .fetch_all(&self.pool)
                .await?,
        )
    }
}
