//! # Signed, time-bound tokens
//!
//! [`TokenAuthority`] issues HS256 JWTs whose claims carry the user id (`sub`),
//! the username and an expiry. The signing secret comes from `auth.secret` and
//! never leaves the server; clients treat the token as opaque.
//!
//! Verification sits behind the [`TokenVerifier`] trait so the request
//! authorizer only sees a [`Verification`] outcome:
//!
//! | Variant | When |
//! |---------|------|
//! | [`Verification::Valid`] | Signature checks out, `exp` is in the future, `sub` is a user id. |
//! | [`Verification::Expired`] | Signature checks out but `exp` has passed. |
//! | [`Verification::Malformed`] | Anything else: not a JWT, wrong signature, wrong algorithm, bad claims. |

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use notes_store::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Longest lifetime a token can be issued with (ten years).
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Who a verified token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid(UserIdentity),
    Expired,
    Malformed,
}

pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Verification;
}

#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenAuthority {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64),
        }
    }

    /// Issue a token for `user`, valid for the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }
}

impl TokenVerifier for TokenAuthority {
    fn verify(&self, token: &str) -> Verification {
        let claims = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::ExpiredSignature => Verification::Expired,
                    _ => Verification::Malformed,
                }
            }
        };

        match Uuid::parse_str(&claims.sub) {
            Ok(id) => Verification::Valid(UserIdentity {
                id,
                username: claims.username,
            }),
            Err(_) => Verification::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "root".into(),
            name: None,
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let authority = TokenAuthority::new("secret", 3600);
        let user = user();

        let token = authority.issue(&user).unwrap();
        assert_eq!(
            authority.verify(&token),
            Verification::Valid(UserIdentity {
                id: user.id,
                username: "root".into(),
            })
        );
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let authority = TokenAuthority::new("secret", 3600);
        let now = Utc::now().timestamp();
        let token = authority
            .sign(&Claims {
                sub: Uuid::new_v4().to_string(),
                username: "root".into(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert_eq!(authority.verify(&token), Verification::Expired);
    }

    #[test]
    fn foreign_signature_is_malformed() {
        let ours = TokenAuthority::new("secret", 3600);
        let theirs = TokenAuthority::new("another secret", 3600);

        let token = theirs.issue(&user()).unwrap();
        assert_eq!(ours.verify(&token), Verification::Malformed);
    }

    #[test]
    fn garbage_is_malformed() {
        let authority = TokenAuthority::new("secret", 3600);
        assert_eq!(authority.verify("not.a.token"), Verification::Malformed);
        assert_eq!(authority.verify(""), Verification::Malformed);
    }

    #[test]
    fn non_uuid_subject_is_malformed() {
        let authority = TokenAuthority::new("secret", 3600);
        let token = authority
            .sign(&Claims {
                sub: "5a422a851b54a676234d17f7".into(),
                username: "root".into(),
                iat: Utc::now().timestamp(),
                exp: Utc::now().timestamp() + 60,
            })
            .unwrap();

        assert_eq!(authority.verify(&token), Verification::Malformed);
    }
}
