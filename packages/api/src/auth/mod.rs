//! Authentication: password hashing, token issuance/verification, login and
//! the bearer-token extractor used by protected routes.

mod extract;
mod login;
pub mod password;
pub mod token;

pub use extract::Authorized;
pub use login::{AuthService, LoginResponse};
pub use token::{Claims, TokenAuthority, TokenVerifier, UserIdentity, Verification};
