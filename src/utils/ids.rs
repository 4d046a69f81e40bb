use uuid::Uuid;

use crate::error::{AppError, Result};

/// Parses a string-encoded store identifier.
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid identifier: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphenated_and_simple_forms() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_id(&id.simple().to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_id("64f0c2"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id(""), Err(AppError::BadRequest(_))));
    }
}
