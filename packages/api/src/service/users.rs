use std::sync::Arc;

use notes_store::{NewUser, NoteStore, UserInfo, UserStore};

use crate::auth::password::hash_password_blocking;
use crate::error::AppError;

const MIN_LENGTH: usize = 3;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    notes: Arc<dyn NoteStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, notes: Arc<dyn NoteStore>) -> Self {
        Self { users, notes }
    }

    /// Register a new user. Uniqueness of `username` is left to the store.
    pub async fn register(
        &self,
        username: Option<String>,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<UserInfo, AppError> {
        let username = username.map(|u| u.trim().to_string()).unwrap_or_default();
        if username.is_empty() {
            return Err(AppError::Validation(
                "User validation failed: username: Path `username` is required.".into(),
            ));
        }
        if username.chars().count() < MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "User validation failed: username: Path `username` (`{username}`) is shorter than the minimum allowed length ({MIN_LENGTH})."
            )));
        }

        let password = password.unwrap_or_default();
        if password.chars().count() < MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_LENGTH} characters long"
            )));
        }

        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let password_hash = hash_password_blocking(password).await?;

        let user = self
            .users
            .create(NewUser {
                username,
                name,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");

        Ok(user.to_info(Vec::new()))
    }

    /// All users, each with the ids of the notes they own.
    pub async fn list(&self) -> Result<Vec<UserInfo>, AppError> {
        let users = self.users.list().await?;
        let mut infos = Vec::with_capacity(users.len());
        for user in users {
            let notes = self.notes.ids_by_owner(user.id).await?;
            infos.push(user.to_info(notes));
        }
        Ok(infos)
    }
}
