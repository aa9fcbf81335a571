use crate::error::ValidationError;
use crate::id::{RecordId, UserId};
use crate::record::parse_decimal;
use crate::slot::{NewSlot, SlotKind, ValidatedSlot};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

/// Lazy-loaded email validation regex
///
/// A practical subset of RFC 5322, compiled once and reused.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Validates an email address
///
/// # Examples
///
/// ```rust
/// use studio_core::validation::validate_email;
///
/// assert!(validate_email("admin@studio.test").is_ok());
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingField(
            "Email is required".to_string(),
        ));
    }

    if email.len() > 254 {
        return Err(ValidationError::InvalidEmail(
            "Email is too long".to_string(),
        ));
    }

    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(format!(
            "Invalid email format: {email}"
        )))
    }
}

/// Validates an admin password.
///
/// # Password Requirements
///
/// - Minimum 8 characters
/// - Maximum 128 characters
/// - Cannot be empty or whitespace only
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField(
            "Password is required".to_string(),
        ));
    }

    if password.trim().is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password cannot be only whitespace".to_string(),
        ));
    }

    if password.len() < 8 {
        return Err(ValidationError::InvalidPassword(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(ValidationError::InvalidPassword(
            "Password must be no more than 128 characters long".to_string(),
        ));
    }

    Ok(())
}

/// Admin usernames: 3 to 64 characters of letters, digits, `.`, `_` or `-`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::MissingField(
            "Username is required".to_string(),
        ));
    }

    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if !valid_chars || username.len() < 3 || username.len() > 64 {
        return Err(ValidationError::InvalidField(format!(
            "Invalid username: {username}"
        )));
    }

    Ok(())
}

/// Returns the trimmed value, or `MissingField` when it is blank.
pub fn require_field(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parses a form price. Zero is allowed; blank, negative or non-numeric is not.
pub fn validate_price(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = require_field("price", raw)?;
    match parse_decimal(&trimmed) {
        Some(price) if !price.is_sign_negative() => Ok(price),
        _ => Err(ValidationError::InvalidPrice(trimmed)),
    }
}

/// Checks a slot form for the given kind and returns the cleaned values.
///
/// Every field the kind uses must be filled in. Rental slots ignore style and
/// level.
pub fn validate_new_slot(kind: SlotKind, slot: &NewSlot) -> Result<ValidatedSlot, ValidationError> {
    let class_date = require_field("class_date", &slot.class_date)?;

    let (style, level) = if kind.is_class() {
        (
            Some(require_field("style", slot.style.as_deref().unwrap_or_default())?),
            Some(require_field("level", slot.level.as_deref().unwrap_or_default())?),
        )
    } else {
        (None, None)
    };

    let duration = require_field("duration", &slot.duration)?;
    let price = validate_price(&slot.price)?;

    Ok(ValidatedSlot {
        kind,
        class_date,
        style,
        level,
        duration,
        price,
    })
}

/// Admin actions act on one row and need its id.
pub fn require_record_id(id: Option<RecordId>) -> Result<RecordId, ValidationError> {
    id.ok_or_else(|| ValidationError::MissingField("id".to_string()))
}

pub fn validate_user_id(id: &UserId) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::MissingField("id".to_string()));
    }
    Ok(())
}
