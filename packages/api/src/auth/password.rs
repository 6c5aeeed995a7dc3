//! # Password hashing and verification — Argon2id
//!
//! - [`hash_password`] salts the plaintext with a fresh [`SaltString`] and returns the
//!   Argon2id digest as a PHC string (`$argon2id$v=19$m=19456,t=2,p=1$...`), which is
//!   what lands in `users.password_hash`.
//! - [`verify_password`] checks a plaintext against a stored PHC string. A mismatch is
//!   `Ok(false)`; only an unparseable stored hash is an error.
//! - [`DUMMY_HASH`] is a well-formed hash that matches no password. Login verifies
//!   against it when the username is unknown so both failure paths cost one Argon2 run.
//!
//! Handlers go through the `_blocking` variants, which run on tokio's blocking pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Same parameters as `Argon2::default()`; the digest is not derived from any password.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$rxXUb5tUNeUwozY+qRxkXQ$yJLqNUtnVNnOOzCA/8shiKYLsLixIVpvMMmIVwLmDDc";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, stored: &str) -> Result<bool, AppError> {
    let stored = PasswordHash::new(stored)
        .map_err(|e| AppError::Internal(format!("stored password hash unreadable: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("password verification failed: {e}"))),
    }
}

pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}
