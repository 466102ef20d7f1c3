//! Field validation for option structs and request models
//!
//! Option structs implement [`Validate`]; every generated operation calls it
//! before a request is built, so a missing required value never reaches the
//! network. All problems found in one pass are reported together under the
//! `struct-validation-error` code.

use std::collections::HashMap;
use std::fmt;

use crate::error::{codes, SdkError, SdkResult};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A single field-level problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name, dotted for nested values
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Problems in the order they were found
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.into(), message: message.into() });
    }

    /// Record an error when a required value is missing or empty
    pub fn require<T: Required + ?Sized>(&mut self, field: &str, value: &T) {
        if value.is_missing() {
            self.add_field_error(field, "is required and must not be empty");
        }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors grouped by field name
    pub fn by_field(&self) -> HashMap<&str, Vec<&str>> {
        let mut grouped: HashMap<&str, Vec<&str>> = HashMap::new();
        for error in &self.errors {
            grouped.entry(error.field.as_str()).or_default().push(error.message.as_str());
        }
        grouped
    }

    /// `Ok(())` when nothing was recorded, otherwise a
    /// `struct-validation-error`
    pub fn into_result(self) -> SdkResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for SdkError {
    fn from(err: ValidationError) -> Self {
        SdkError::validation(codes::STRUCT_VALIDATION_ERROR, err.to_string())
    }
}

/// Values that can be checked for presence
pub trait Required {
    /// True when the value counts as absent
    fn is_missing(&self) -> bool;
}

impl Required for str {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl Required for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Required for [T] {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Required for Vec<T> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Required> Required for Option<T> {
    fn is_missing(&self) -> bool {
        self.as_ref().map_or(true, Required::is_missing)
    }
}

impl Required for serde_json::Value {
    fn is_missing(&self) -> bool {
        self.is_null()
    }
}

/// Implemented by option structs and request models with required fields
pub trait Validate {
    /// Check every required field
    fn validate(&self) -> SdkResult<()>;
}

/// Validate a single required value, returning it on success
///
/// Used by model constructors that take their required fields directly.
pub fn require_value<T: Required>(field: &str, value: T) -> SdkResult<T> {
    if value.is_missing() {
        Err(ValidationError::field(field, "is required and must not be empty").into())
    } else {
        Ok(value)
    }
}
