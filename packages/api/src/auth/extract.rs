use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::token::{UserIdentity, Verification};
use crate::error::AppError;
use crate::state::AppState;

/// Extractor for routes that require a bearer token.
///
/// Rejects with 401 when the `Authorization` header is missing, does not use
/// the `Bearer` scheme, or carries a token that fails verification.
#[derive(Debug, Clone)]
pub struct Authorized(pub UserIdentity);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Err(AppError::Auth("token missing or invalid".into()));
        };

        match state.verifier.verify(token) {
            Verification::Valid(identity) => Ok(Authorized(identity)),
            Verification::Expired => Err(AppError::Auth("token expired".into())),
            Verification::Malformed => Err(AppError::Auth("token missing or invalid".into())),
        }
    }
}
