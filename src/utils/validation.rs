use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{AppError, AppResult};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded, otherwise `AppError::InvalidFields`.
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {}", messages.join(" "))?;
            first = false;
        }
        Ok(())
    }
}

pub fn validate_required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    max_chars: usize,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "This field is required.");
    } else if trimmed.chars().count() > max_chars {
        errors.add(
            field,
            format!("Ensure this value has at most {max_chars} characters."),
        );
    }
}

pub fn validate_username(errors: &mut FieldErrors, username: &str) {
    validate_required_text(errors, "username", username, 150);
    if !username.trim().is_empty() && !USERNAME_RE.is_match(username) {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }
}

/// An empty e-mail is allowed; a non-empty one must look like an address.
pub fn validate_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        return;
    }
    if email.chars().count() > 254 || !EMAIL_RE.is_match(email) {
        errors.add("email", "Enter a valid email address.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        let mut errors = FieldErrors::new();
        validate_username(&mut errors, "jane.doe+food@x");
        assert!(errors.is_empty());

        validate_username(&mut errors, "jane doe");
        assert!(errors.get("username").is_some());
    }

    #[test]
    fn test_validate_email() {
        let mut errors = FieldErrors::new();
        validate_email(&mut errors, "");
        validate_email(&mut errors, "test@example.com");
        assert!(errors.is_empty());

        validate_email(&mut errors, "not-an-address");
        assert_eq!(errors.get("email").map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_required_text() {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "name", "   ", 100);
        validate_required_text(&mut errors, "address", &"a".repeat(201), 200);
        assert!(errors.get("name").is_some());
        assert!(errors.get("address").is_some());
        assert!(errors.into_result().is_err());
    }
}
