//! User domain
//!
//! Field rules and payload records for the user service: nickname, email and
//! profile URL checks, password complexity, and the records built from them.

mod error;
mod fields;
mod password;
mod record;
mod role;
mod schemas;
mod validation;

pub use error::{
    FieldErrorDetail, FieldValidationError, UserValidationError, ValidationErrorBody,
    ValidationErrorResponse, ValidationErrors,
};
pub use fields::FieldReader;
pub use password::{
    check_password_complexity, validate_password_complexity, PasswordComplexityError,
    PasswordRequirement, MIN_PASSWORD_LENGTH, SPECIAL_CHARACTERS,
};
pub use record::{
    validate, validate_json, RecordKind, Schema, UnknownRecordKind, ValidatedRecord, ROOT_FIELD,
};
pub use role::UserRole;
pub use schemas::{
    Link, LoginRequest, UserBase, UserCreate, UserListResponse, UserResponse, UserUpdate,
};
pub use validation::{
    parse_user_id, validate_email, validate_nickname, validate_profile_url, ALLOWED_URL_SCHEMES,
    MIN_NICKNAME_LENGTH,
};
