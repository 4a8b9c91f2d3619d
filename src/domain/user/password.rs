//! Password complexity rules

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Minimum number of characters a password must have
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters accepted as the "special" class
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A single complexity requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRequirement {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    SpecialCharacter,
}

impl PasswordRequirement {
    fn describe(&self) -> String {
        match self {
            Self::MinLength => format!("at least {} characters", MIN_PASSWORD_LENGTH),
            Self::Uppercase => "an uppercase letter".to_string(),
            Self::Lowercase => "a lowercase letter".to_string(),
            Self::Digit => "a digit".to_string(),
            Self::SpecialCharacter => "a special character".to_string(),
        }
    }
}

impl fmt::Display for PasswordRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Password failed one or more complexity requirements
///
/// Every unmet requirement is listed, in a fixed order starting with length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Password must contain {}", join_requirements(.unmet))]
pub struct PasswordComplexityError {
    unmet: Vec<PasswordRequirement>,
}

impl PasswordComplexityError {
    /// Requirements the password did not satisfy
    pub fn unmet(&self) -> &[PasswordRequirement] {
        &self.unmet
    }

    /// Check whether a specific requirement was violated
    pub fn is_unmet(&self, requirement: PasswordRequirement) -> bool {
        self.unmet.contains(&requirement)
    }

    /// True when the minimum length is among the unmet requirements
    pub fn is_too_short(&self) -> bool {
        self.is_unmet(PasswordRequirement::MinLength)
    }
}

fn join_requirements(unmet: &[PasswordRequirement]) -> String {
    unmet
        .iter()
        .map(PasswordRequirement::describe)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_special(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(c)
}

/// Check a password against the complexity rules
///
/// Rules:
/// - Minimum 8 characters
/// - At least one uppercase letter, one lowercase letter and one digit
/// - At least one character from [`SPECIAL_CHARACTERS`]
///
/// All rules are evaluated, so a short password that satisfies every
/// character class still fails on length.
pub fn check_password_complexity(password: &str) -> Result<(), PasswordComplexityError> {
    let mut unmet = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        unmet.push(PasswordRequirement::MinLength);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        unmet.push(PasswordRequirement::Uppercase);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        unmet.push(PasswordRequirement::Lowercase);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        unmet.push(PasswordRequirement::Digit);
    }

    if !password.chars().any(is_special) {
        unmet.push(PasswordRequirement::SpecialCharacter);
    }

    if unmet.is_empty() {
        Ok(())
    } else {
        Err(PasswordComplexityError { unmet })
    }
}

/// Validate a password and hand it back unchanged
///
/// Pass-through form of [`check_password_complexity`] for use as a field rule.
pub fn validate_password_complexity<S: AsRef<str>>(
    password: S,
) -> Result<S, PasswordComplexityError> {
    check_password_complexity(password.as_ref())?;
    Ok(password)
}
