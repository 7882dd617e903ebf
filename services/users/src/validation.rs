//! Input validation and normalization utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{UserError, UserResult};
use crate::models::{DEFAULT_INACTIVATION_REASON, DocumentType};

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize an email and check it looks like one.
///
/// Only the presence of `@` is checked.
pub fn validate_email(email: &str) -> UserResult<String> {
    let email = normalize_email(email);
    if !email.contains('@') {
        return Err(UserError::InvalidEmail);
    }
    Ok(email)
}

/// Validate password length
pub fn validate_password(password: &str) -> UserResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserError::InvalidPassword);
    }
    Ok(())
}

/// Resolve a document type code; blank input selects the national id
pub fn parse_document_type(document_type: Option<&str>) -> UserResult<DocumentType> {
    let code = document_type.unwrap_or_default().trim().to_uppercase();
    if code.is_empty() {
        return Ok(DocumentType::default());
    }

    code.parse().map_err(UserError::InvalidDocument)
}

/// Strip surrounding whitespace plus interior spaces and hyphens
pub fn normalize_document_number(number: &str) -> String {
    number
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Normalize a document number and check its shape
pub fn validate_document_number(number: &str) -> UserResult<String> {
    let number = normalize_document_number(number);
    if number.is_empty() {
        return Err(UserError::InvalidDocument(
            "Document number is required".to_string(),
        ));
    }

    static DOCUMENT_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DOCUMENT_NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9A-Za-z]{5,20}$").expect("Failed to compile document number regex")
    });

    if !regex.is_match(&number) {
        return Err(UserError::InvalidDocument(
            "Document number must be 5 to 20 letters or digits".to_string(),
        ));
    }

    Ok(number)
}

/// Trim an optional text field; blank values become absent
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Deactivation reason, falling back to the default sentinel
pub fn normalize_reason(reason: Option<&str>) -> String {
    normalize_optional(reason).unwrap_or_else(|| DEFAULT_INACTIVATION_REASON.to_string())
}
