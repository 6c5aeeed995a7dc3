use std::sync::Arc;

use notes_store::UserStore;
use serde::{Deserialize, Serialize};

use super::password::{verify_password_blocking, DUMMY_HASH};
use super::token::TokenAuthority;
use crate::error::AppError;

const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Body returned by `POST /api/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

/// Checks credentials against the user store and issues tokens. Stateless:
/// nothing is recorded about a successful login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenAuthority>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenAuthority>) -> Self {
        Self { users, tokens }
    }

    /// Log in with username and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self.users.find_by_username(username).await?;

        // Unknown users still pay for one verification.
        let stored = user
            .as_ref()
            .map_or(DUMMY_HASH, |u| u.password_hash.as_str())
            .to_string();
        let valid = verify_password_blocking(password.to_string(), stored).await?;

        let Some(user) = user.filter(|_| valid) else {
            tracing::info!(username, "login rejected");
            return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
        };

        let token = self.tokens.issue(&user)?;
        tracing::info!(username, user_id = %user.id, "token issued");

        Ok(LoginResponse {
            token,
            username: user.username,
            name: user.name,
        })
    }
}
