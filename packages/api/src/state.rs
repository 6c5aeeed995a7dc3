use std::sync::Arc;

use notes_store::{NoteStore, UserStore};

use crate::auth::{AuthService, TokenAuthority, TokenVerifier};
use crate::service::{NoteService, UserService};

/// Everything a request handler can reach. Cheap to clone; the stores are
/// shared behind `Arc`s and there is no other process-wide state.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub users: UserService,
    pub auth: AuthService,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        notes: Arc<dyn NoteStore>,
        tokens: TokenAuthority,
    ) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            notes: NoteService::new(notes.clone(), users.clone()),
            users: UserService::new(users.clone(), notes),
            auth: AuthService::new(users, tokens.clone()),
            verifier: tokens,
        }
    }

    /// Replace the token verifier, keeping everything else.
    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}
