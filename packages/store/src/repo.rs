//! # Persistence traits for the two collections
//!
//! [`UserStore`] is the credential store and [`NoteStore`] holds notes. Both are
//! `async_trait` object-safe traits so the HTTP layer can hold them as
//! `Arc<dyn UserStore>` / `Arc<dyn NoteStore>` and stay ignorant of the backend.
//!
//! Implementations live in sibling modules: [`crate::MemoryStore`] for tests and
//! local runs, and `PgStore` for PostgreSQL.
//!
//! ## Uniqueness
//!
//! [`UserStore::create`] is the only place where username uniqueness is decided.
//! Backends must make the check and the insert a single atomic step and report a
//! clash as [`StoreError::Duplicate`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewNote, NewUser, Note, NoteUpdate, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("expected `{field}` to be unique. Value: `{value}`")]
    Duplicate { field: &'static str, value: String },

    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, failing with [`StoreError::Duplicate`] if the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn list(&self) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError>;

    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Apply a partial update. Returns `None` if no note has this id.
    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<Option<Note>, StoreError>;

    /// Remove a note. Returns whether a note was actually removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Ids of all notes owned by `owner`.
    async fn ids_by_owner(&self, owner: Uuid) -> Result<Vec<Uuid>, StoreError>;
}
