//! Note and user operations, independent of HTTP.

mod notes;
mod users;

pub use notes::NoteService;
pub use users::UserService;

use uuid::Uuid;

use crate::error::AppError;

/// Parse a path id. Anything that is not a UUID is [`AppError::InvalidId`].
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_are_rejected() {
        for raw in ["4dwgw3463tbdfgret3456346f", "", "5a422a851b54a676234d17f7", "123"] {
            assert!(matches!(parse_id(raw), Err(AppError::InvalidId)), "{raw}");
        }
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
