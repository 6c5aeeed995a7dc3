pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
mod pg;
#[cfg(feature = "postgres")]
pub use pg::PgStore;

pub use models::{NewNote, NewUser, Note, NoteUpdate, User, UserInfo};
pub use repo::{NoteStore, StoreError, UserStore};
