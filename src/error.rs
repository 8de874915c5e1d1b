//! Errors surfaced by the data layer.
//!
//! Repositories fail in exactly one way: an `update` or `delete` against an
//! id that is not in the collection ([`Error::NotFound`]). Everything else
//! here belongs to the layers around them:
//! - search form validation done by callers before a mock search
//! - fixture loading and CSV export
//! - environment configuration

use crate::entities::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("invalid search: {0}")]
    InvalidSearch(String),

    #[error("fixture error: {0}")]
    Fixture(#[from] csv::Error),

    #[error("async fixture error: {0}")]
    AsyncFixture(#[from] csv_async::Error),

    #[error("invalid {kind} fixture: {reason}")]
    FixtureFormat { kind: EntityKind, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_kind_and_id() {
        let err = Error::not_found(EntityKind::Document, "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "document not found: 42");
    }

    #[test]
    fn test_other_errors_are_not_not_found() {
        let err = Error::InvalidSearch("missing origin".to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "invalid search: missing origin");
    }
}
