//! Validation support.
//!
//! Create/Update payloads implement [`Validatable`]; errors carry the field
//! they belong to so the boundary can render field-keyed 422 responses.

use serde::Serialize;
use std::fmt;

/// Validation error with field name and message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Run a single-field check and collect its error, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.add(err);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Convert to Result.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when any error was collected.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Trait for payloads that can be validated before hitting the database.
pub trait Validatable {
    /// Validate the instance, collecting every failure.
    ///
    /// # Errors
    ///
    /// Returns all collected `ValidationErrors` when any check fails.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Helper validators for common patterns.
pub mod validators {
    use super::ValidationError;

    /// Validate value is not empty.
    ///
    /// # Errors
    ///
    /// Returns a field-keyed error when the value is blank.
    pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
        Ok(())
    }

    /// Basic email validation.
    ///
    /// # Errors
    ///
    /// Returns a field-keyed error on malformed or overlong addresses.
    pub fn validate_email(field: &str, value: &str) -> Result<(), ValidationError> {
        if !value.contains('@') || !value.contains('.') {
            return Err(ValidationError::new(field, "Invalid email format"));
        }
        if value.len() > 255 {
            return Err(ValidationError::new(
                field,
                "Email must be at most 255 characters",
            ));
        }
        Ok(())
    }

    /// Validate string length is within range.
    ///
    /// # Errors
    ///
    /// Returns a field-keyed error when the length is out of bounds.
    pub fn validate_length(
        field: &str,
        value: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), ValidationError> {
        let len = value.len();
        if let Some(min_len) = min
            && len < min_len
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at least {min_len} characters"),
            ));
        }
        if let Some(max_len) = max
            && len > max_len
        {
            return Err(ValidationError::new(
                field,
                format!("Must be at most {max_len} characters"),
            ));
        }
        Ok(())
    }
}

/// Identity-document number validators.
///
/// These implement the broadcaster's intake rules: KTP is the 16-digit
/// national identity card, SIM the 12-digit driving licence, and passports
/// are one uppercase letter followed by seven digits.
pub mod identity {
    use super::ValidationError;

    fn all_digits(value: &str) -> bool {
        !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
    }

    fn all_identical(value: &str) -> bool {
        let mut bytes = value.bytes();
        bytes
            .next()
            .is_some_and(|first| bytes.all(|b| b == first))
    }

    /// Validate a KTP number: 16 digits, not all identical, not all zero.
    ///
    /// # Errors
    ///
    /// Returns a field-keyed error describing the first failed rule.
    pub fn validate_ktp(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.len() != 16 || !all_digits(value) {
            return Err(ValidationError::new(field, "KTP number must be 16 digits"));
        }
        if all_identical(value) {
            return Err(ValidationError::new(field, "KTP number is not valid"));
        }
        Ok(())
    }

    /// Validate a SIM number: 12 digits, not all identical, not all zero.
    ///
    /// # Errors
    ///
    /// Returns a field-keyed error describing the first failed rule.
    pub fn validate_sim(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.len() != 12 || !all_digits(value) {
            return Err(ValidationError::new(field, "SIM number must be 12 digits"));
        }
        if all_identical(value) {
            return Err(ValidationError::new(field, "SIM number is not valid"));
        }
        Ok(())
    }

    /// Validate a passport number: one uppercase letter followed by 7
    /// digits, digits not all zero.
    ///
    /// # Errors
    ///
    /// Returns a field-keyed error describing the first failed rule.
    pub fn validate_passport(field: &str, value: &str) -> Result<(), ValidationError> {
        let mut chars = value.chars();
        let leading_ok = chars.next().is_some_and(|c| c.is_ascii_uppercase());
        let digits: String = chars.collect();
        if !leading_ok || digits.len() != 7 || !all_digits(&digits) {
            return Err(ValidationError::new(
                field,
                "Passport number must be 1 uppercase letter followed by 7 digits",
            ));
        }
        if digits.bytes().all(|b| b == b'0') {
            return Err(ValidationError::new(field, "Passport number is not valid"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::identity::{validate_ktp, validate_passport, validate_sim};
    use super::validators::{validate_email, validate_length, validate_required};
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let err = ValidationError::new("email", "Invalid email");
        assert_eq!(err.field, "email");
        assert_eq!(err.message, "Invalid email");
    }

    #[test]
    fn test_validation_errors_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add(ValidationError::new("field1", "error1"));
        errors.check(Err(ValidationError::new("field2", "error2")));
        errors.check(Ok(()));
        assert_eq!(errors.len(), 2);
        assert!(errors.result().is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
        assert!(validate_required("name", "Sari").is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "invalid").is_err());
        assert!(validate_email("email", "staff@example.com").is_ok());
    }

    #[test]
    fn test_validate_length() {
        assert!(validate_length("password", "ab", Some(8), None).is_err());
        assert!(validate_length("password", "long enough", Some(8), Some(72)).is_ok());
    }

    #[test]
    fn test_ktp_accepts_valid_numbers() {
        assert!(validate_ktp("id", "3174012345678901").is_ok());
    }

    #[test]
    fn test_ktp_rejects_bad_shapes() {
        // wrong length
        assert!(validate_ktp("id", "317401234567890").is_err());
        // non-digit
        assert!(validate_ktp("id", "31740123456789AB").is_err());
        // all zero
        assert!(validate_ktp("id", "0000000000000000").is_err());
        // all identical
        assert!(validate_ktp("id", "1111111111111111").is_err());
    }

    #[test]
    fn test_sim_accepts_valid_numbers() {
        assert!(validate_sim("id", "912345678901").is_ok());
    }

    #[test]
    fn test_sim_rejects_bad_shapes() {
        assert!(validate_sim("id", "91234567890").is_err());
        assert!(validate_sim("id", "000000000000").is_err());
        assert!(validate_sim("id", "999999999999").is_err());
    }

    #[test]
    fn test_passport_accepts_valid_numbers() {
        assert!(validate_passport("id", "A1234567").is_ok());
    }

    #[test]
    fn test_passport_rejects_bad_shapes() {
        // lowercase prefix
        assert!(validate_passport("id", "a1234567").is_err());
        // missing prefix
        assert!(validate_passport("id", "12345678").is_err());
        // short digit run
        assert!(validate_passport("id", "A123456").is_err());
        // all-zero digits
        assert!(validate_passport("id", "A0000000").is_err());
    }
}
