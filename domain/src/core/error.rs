//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = DomainError::Validation("title is required".to_string());
        assert_eq!(error.to_string(), "Validation failed: title is required");
    }
}
