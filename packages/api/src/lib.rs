//! # API crate — HTTP surface of the notes backend
//!
//! Wires the persistence traits from `notes-store` into an axum [`Router`](axum::Router).
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2 password hashing, JWT issuance and verification, login, the `Authorized` extractor |
//! | [`error`] | [`AppError`] and its mapping to status codes and `{ "error": ... }` bodies |
//! | [`routes`] | Request bodies, handlers and [`router`] |
//! | [`service`] | Note and user operations, id parsing |
//! | [`settings`] | Layered configuration (`config.toml`, environment, `.env`) |
//! | [`state`] | [`AppState`], the handle shared by all handlers |
//!
//! ## Routes
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | GET | `/api/notes` | — |
//! | GET | `/api/notes/{id}` | — |
//! | POST | `/api/notes` | Bearer token |
//! | PUT | `/api/notes/{id}` | — |
//! | DELETE | `/api/notes/{id}` | — |
//! | GET | `/api/users` | — |
//! | POST | `/api/users` | — |
//! | POST | `/api/login` | — |

pub mod auth;
pub mod error;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;

pub use error::AppError;
pub use routes::router;
pub use settings::Settings;
pub use state::AppState;
