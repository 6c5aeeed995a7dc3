use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{NewNote, NewUser, Note, NoteUpdate, User};
use crate::repo::{NoteStore, StoreError, UserStore};

/// In-memory store for tests and database-less runs.
///
/// Records are kept in insertion order. Each operation holds the lock for its
/// whole duration, which is what makes username uniqueness atomic here.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<User>>>,
    notes: Arc<Mutex<Vec<Note>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|e| StoreError::Database(e.to_string().into()))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = lock(&self.users)?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                field: "username",
                value: user.username,
            });
        }
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.users)?
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.users)?.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(lock(&self.users)?.clone())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        let note = Note {
            id: Uuid::new_v4(),
            content: note.content,
            date: Utc::now(),
            important: note.important,
            owner: note.owner,
        };
        lock(&self.notes)?.push(note.clone());
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Ok(lock(&self.notes)?.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        Ok(lock(&self.notes)?.iter().find(|n| n.id == id).cloned())
    }

    async fn update(&self, id: Uuid, update: NoteUpdate) -> Result<Option<Note>, StoreError> {
        let mut notes = lock(&self.notes)?;
        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(content) = update.content {
            note.content = content;
        }
        if let Some(important) = update.important {
            note.important = important;
        }
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut notes = lock(&self.notes)?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        Ok(notes.len() != before)
    }

    async fn ids_by_owner(&self, owner: Uuid) -> Result<Vec<Uuid>, StoreError> {
        Ok(lock(&self.notes)?
            .iter()
            .filter(|n| n.owner == Some(owner))
            .map(|n| n.id)
            .collect())
    }
}
