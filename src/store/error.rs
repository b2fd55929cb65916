//! Store Errors
//!
//! Error types for account persistence.

use std::time::Duration;

/// Errors that can occur in the account store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Username already occupied (active or disabled)
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store call exceeded its deadline
    #[error("Store call exceeded deadline of {0:?}")]
    Timeout(Duration),

    /// Row content that cannot be represented in the domain
    #[error("Malformed account row: {0}")]
    MalformedRow(String),
}

impl StoreError {
    /// Map a sqlx error from an insert, recognising unique violations
    pub fn from_insert(err: sqlx::Error, username: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateUsername(username.to_string())
            }
            _ => StoreError::Database(err),
        }
    }

    /// Check if this error is a duplicate-username conflict
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::DuplicateUsername(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_insert_error_passes_through() {
        let err = StoreError::from_insert(sqlx::Error::RowNotFound, "alice123");
        assert!(!err.is_duplicate());
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_display_messages() {
        let err = StoreError::DuplicateUsername("alice123".to_string());
        assert!(err.is_duplicate());
        assert_eq!(err.to_string(), "Username already taken: alice123");

        let err = StoreError::Timeout(Duration::from_millis(250));
        assert!(err.to_string().contains("250ms"));
    }
}
