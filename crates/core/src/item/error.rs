use thiserror::Error;

use crate::number::NumberError;

/// Errors raised while validating an inbound request.
///
/// Every variant is the caller's fault and maps to a 400 response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("\"id\" (primary key) is required in the body")]
    MissingId,
    #[error("\"id\" (primary key) must be a non-empty string")]
    InvalidId,
    #[error("Path parameter \"id\" is required")]
    MissingPathId,
    #[error("Attribute names must not be empty")]
    EmptyAttributeName,
    #[error("Request body must contain attributes to update (excluding \"id\")")]
    NoAttributesToUpdate,
    #[error(transparent)]
    InvalidNumber(#[from] NumberError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_display() {
        assert_eq!(
            ValidationError::MissingId.to_string(),
            "\"id\" (primary key) is required in the body"
        );
    }

    #[test]
    fn test_no_attributes_display() {
        assert_eq!(
            ValidationError::NoAttributesToUpdate.to_string(),
            "Request body must contain attributes to update (excluding \"id\")"
        );
    }

    #[test]
    fn test_invalid_number_is_transparent() {
        let error = ValidationError::from(NumberError::Invalid("1..2".to_string()));
        assert_eq!(error.to_string(), "Invalid number: 1..2");
    }
}
