//! # Domain records for users and notes
//!
//! Typed counterparts of the two persisted collections. Every field that the
//! HTTP layer treats as required is non-optional here, so a record that exists
//! is a record that passed validation.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A registered account. Holds the Argon2 `password_hash`, which never leaves the server. |
//! | [`UserInfo`] | The client-safe projection of a [`User`], including the ids of the notes it owns. |
//! | [`Note`] | A note row. `owner` is serialized as `user` to keep the wire format of the notes API. |
//! | [`NewUser`] / [`NewNote`] | Insert payloads; ids and timestamps are assigned by the store. |
//! | [`NoteUpdate`] | Partial update; `None` fields are left untouched. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full user record from the database.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self, notes: Vec<Uuid>) -> UserInfo {
        UserInfo {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            notes,
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub notes: Vec<Uuid>,
}

/// A stored note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    /// Set by the server when the note is created
    pub date: DateTime<Utc>,
    pub important: bool,
    /// The creating user; `None` only for rows seeded outside the API
    #[serde(rename = "user")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "user_id"))]
    pub owner: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub content: String,
    pub important: bool,
    pub owner: Option<Uuid>,
}

impl NewNote {
    pub fn new(content: impl Into<String>, important: bool) -> Self {
        Self {
            content: content.into(),
            important,
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: Uuid) -> Self {
        self.owner = Some(owner);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub content: Option<String>,
    pub important: Option<bool>,
}
