//! User validation errors

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::password::PasswordComplexityError;
use super::record::RecordKind;

/// Reason a single field was rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Field is required")]
    Missing,

    #[error("Expected {0}")]
    InvalidType(&'static str),

    #[error("Nickname cannot be empty")]
    EmptyNickname,

    #[error("Nickname is too short. Minimum length is {0} characters")]
    NicknameTooShort(usize),

    #[error("Nickname contains invalid character: '{0}'. Only letters, digits, underscores, and hyphens are allowed")]
    InvalidNicknameCharacter(char),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid URL scheme '{0}'. Only http and https are allowed")]
    UnsupportedUrlScheme(String),

    #[error(transparent)]
    WeakPassword(#[from] PasswordComplexityError),

    #[error("Invalid role '{0}'. Expected one of ANONYMOUS, AUTHENTICATED, MANAGER, ADMIN")]
    InvalidRole(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),
}

impl UserValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::InvalidType(_) => "invalid_type",
            Self::EmptyNickname => "empty_nickname",
            Self::NicknameTooShort(_) => "nickname_too_short",
            Self::InvalidNicknameCharacter(_) => "invalid_nickname_character",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyUrl => "empty_url",
            Self::InvalidUrl(_) => "invalid_url",
            Self::UnsupportedUrlScheme(_) => "invalid_url_scheme",
            Self::WeakPassword(_) => "weak_password",
            Self::InvalidRole(_) => "invalid_role",
            Self::InvalidUuid(_) => "invalid_uuid",
            Self::MalformedJson(_) => "malformed_json",
        }
    }
}

/// A rejected field together with the reason
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{field}: {reason}")]
pub struct FieldValidationError {
    pub field: String,
    pub reason: UserValidationError,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, reason: UserValidationError) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, UserValidationError::Missing)
    }
}

/// All field failures collected while validating one record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    record: RecordKind,
    errors: Vec<FieldValidationError>,
}

impl ValidationErrors {
    pub fn new(record: RecordKind, errors: Vec<FieldValidationError>) -> Self {
        Self { record, errors }
    }

    /// Record kind that failed validation
    pub fn record(&self) -> RecordKind {
        self.record
    }

    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldValidationError> {
        self.errors
    }

    /// Names of the rejected fields, in the order they were checked
    pub fn field_names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Check whether a field was rejected
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Reason for a field, if it was rejected
    pub fn reason_for(&self, field: &str) -> Option<&UserValidationError> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.reason)
    }

    /// Body suitable for a client-facing error response
    pub fn to_response(&self) -> ValidationErrorResponse {
        ValidationErrorResponse {
            error: ValidationErrorBody {
                message: self.to_string(),
                error_type: "invalid_request_error",
                record: self.record.to_string(),
                fields: self
                    .errors
                    .iter()
                    .map(|e| FieldErrorDetail {
                        field: e.field.clone(),
                        code: e.reason.code(),
                        message: e.reason.to_string(),
                    })
                    .collect(),
            },
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation error(s) for {}: ",
            self.errors.len(),
            self.record
        )?;

        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        write!(f, "{}", joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Serialisable error response
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub error: ValidationErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: &'static str,
    pub record: String,
    pub fields: Vec<FieldErrorDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldErrorDetail {
    pub field: String,
    pub code: &'static str,
    pub message: String,
}
