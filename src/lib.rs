//! User Schemas
//!
//! Validation rules for the payloads of a user-management service:
//! - Field rules for nicknames, email addresses and profile URLs
//! - Password complexity checks
//! - Record validation for create/update/login/response payloads that
//!   reports every rejected field at once

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::user::{
    check_password_complexity, validate, validate_json, validate_password_complexity,
    FieldValidationError, RecordKind, Schema, ValidatedRecord, ValidationErrors,
};
