use serde::Serialize;
use std::fmt;

/// A single validation failure, tied to the form field it belongs to so the
/// caller can re-render per-field messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

/// Outcome taxonomy for directory operations.
///
/// `Validation`, `NotFound` and `Unauthorized` are recoverable, caller-facing
/// outcomes. `StoreUnavailable` and `PhotoStoreUnavailable` are faults from
/// the backing stores; they propagate unmodified and are never downgraded to
/// `NotFound`.
#[derive(Debug)]
pub enum DirectoryError {
    Validation(Vec<FieldError>),
    NotFound,
    Unauthorized,
    StoreUnavailable(String),
    PhotoStoreUnavailable(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Validation(errors) => {
                write!(f, "Validation failed:")?;
                for err in errors {
                    write!(f, " [{}: {}]", err.field, err.message)?;
                }
                Ok(())
            }
            DirectoryError::NotFound => write!(f, "Employee not found"),
            DirectoryError::Unauthorized => write!(f, "Unauthorized"),
            DirectoryError::StoreUnavailable(msg) => write!(f, "Employee store unavailable: {}", msg),
            DirectoryError::PhotoStoreUnavailable(msg) => write!(f, "Photo store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for DirectoryError {}
