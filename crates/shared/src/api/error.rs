use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Field-level validation failures, in declaration order. The error
/// translator reports only the first entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{}", first_message(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }
}

fn first_message(errors: &[FieldError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("validation failed")
}
