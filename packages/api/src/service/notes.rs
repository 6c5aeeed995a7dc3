use std::sync::Arc;

use notes_store::{NewNote, Note, NoteStore, NoteUpdate, UserStore};
use uuid::Uuid;

use crate::auth::UserIdentity;
use crate::error::AppError;

const CONTENT_REQUIRED: &str = "Note validation failed: content: Path `content` is required.";

fn require_content(content: Option<String>) -> Result<String, AppError> {
    match content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(AppError::Validation(CONTENT_REQUIRED.into())),
    }
}

#[derive(Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteStore>,
    users: Arc<dyn UserStore>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteStore>, users: Arc<dyn UserStore>) -> Self {
        Self { notes, users }
    }

    /// Create a note owned by the authenticated user. `important` defaults to false.
    pub async fn create(
        &self,
        owner: &UserIdentity,
        content: Option<String>,
        important: Option<bool>,
    ) -> Result<Note, AppError> {
        let content = require_content(content)?;

        // The token can outlive its user.
        let Some(user) = self.users.find_by_id(owner.id).await? else {
            return Err(AppError::Auth("token owner no longer exists".into()));
        };

        let note = self
            .notes
            .insert(NewNote::new(content, important.unwrap_or(false)).owned_by(user.id))
            .await?;
        tracing::info!(note_id = %note.id, user_id = %user.id, "note created");
        Ok(note)
    }

    pub async fn list(&self) -> Result<Vec<Note>, AppError> {
        Ok(self.notes.list().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Note, AppError> {
        self.notes
            .find(id)
            .await?
            .ok_or(AppError::NotFound("note"))
    }

    /// Change content and/or importance of an existing note.
    pub async fn update_by_id(
        &self,
        id: Uuid,
        content: Option<String>,
        important: Option<bool>,
    ) -> Result<Note, AppError> {
        let content = content.map(|c| require_content(Some(c))).transpose()?;
        self.notes
            .update(id, NoteUpdate { content, important })
            .await?
            .ok_or(AppError::NotFound("note"))
    }

    /// Delete a note. Succeeds whether or not the note existed.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        if self.notes.delete(id).await? {
            tracing::info!(note_id = %id, "note deleted");
        } else {
            tracing::debug!(note_id = %id, "delete of absent note");
        }
        Ok(())
    }
}
