//! Desktop error taxonomy.
//!
//! Only the failures a caller can act on are surfaced here. Lenient paths
//! (opening an unknown window, pointer events for a pointer with no active
//! gesture, unreadable layout blobs) degrade to no-ops and are not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("Window id already in use: {0}")]
    DuplicateId(String),

    #[error("Window not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_display() {
        let err = DesktopError::DuplicateId("console".to_string());
        assert!(err.to_string().contains("console"));
        assert!(err.to_string().contains("already in use"));
    }

    #[test]
    fn test_not_found_display() {
        let err = DesktopError::NotFound("links".to_string());
        assert!(err.to_string().contains("not found"));
    }
}
