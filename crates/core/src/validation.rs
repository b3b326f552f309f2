//! Input validation helpers shared by request types.

use crate::errors::{CourtError, CourtResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Returns the trimmed value, or a validation error naming `field`.
pub fn require<'a>(field: &str, value: &'a str) -> CourtResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CourtError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> CourtResult<()> {
    let email = require("email", email)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty())
        }
        None => false,
    };

    if !valid {
        return Err(CourtError::Validation(format!("'{}' is not a valid email address", email)));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> CourtResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CourtError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Accepts `#rrggbb` colours.
pub fn validate_hex_color(field: &str, value: &str) -> CourtResult<()> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(CourtError::Validation(format!(
            "{} must be a #rrggbb colour, got '{}'",
            field, value
        )));
    }
    Ok(())
}

/// Shows only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
