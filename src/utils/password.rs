use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::{AppError, AppResult};
use crate::utils::FieldErrors;

/// Password policy applied at registration. Messages are recorded against `field`.
pub fn validate_password(errors: &mut FieldErrors, field: &str, password: &str, username: &str) {
    if password.chars().count() < 8 {
        errors.add(
            field,
            "This password is too short. It must contain at least 8 characters.",
        );
    }
    if password.len() > 128 {
        errors.add(field, "This password is too long.");
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.add(field, "This password is entirely numeric.");
    }
    if !username.is_empty() && password.eq_ignore_ascii_case(username) {
        errors.add(field, "The password is too similar to the username.");
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))
}
