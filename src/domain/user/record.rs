//! Record kinds and the top-level validation entry point

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::error::{FieldValidationError, UserValidationError, ValidationErrors};
use super::fields::FieldReader;
use super::schemas::{
    LoginRequest, UserBase, UserCreate, UserListResponse, UserResponse, UserUpdate,
};

/// Field name used for failures that concern the payload as a whole
pub const ROOT_FIELD: &str = "$";

/// Payload shapes known to the user service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    UserBase,
    UserCreate,
    UserUpdate,
    UserResponse,
    UserListResponse,
    LoginRequest,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        Self::UserBase,
        Self::UserCreate,
        Self::UserUpdate,
        Self::UserResponse,
        Self::UserListResponse,
        Self::LoginRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserBase => "user_base",
            Self::UserCreate => "user_create",
            Self::UserUpdate => "user_update",
            Self::UserResponse => "user_response",
            Self::UserListResponse => "user_list_response",
            Self::LoginRequest => "login_request",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown record kind '{0}'")]
pub struct UnknownRecordKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownRecordKind(s.to_string()))
    }
}

fn whole_payload_error(kind: RecordKind, reason: UserValidationError) -> ValidationErrors {
    ValidationErrors::new(kind, vec![FieldValidationError::new(ROOT_FIELD, reason)])
}

/// A payload shape assembled from independently validated fields
pub trait Schema: Sized {
    const KIND: RecordKind;

    /// Fields this record reads; anything else is ignored
    const FIELDS: &'static [&'static str];

    /// Read every field, recording failures on `reader`
    ///
    /// Returns `None` if any field failed.
    fn read(reader: &mut FieldReader<'_>) -> Option<Self>;

    /// Validate a JSON object, reporting every rejected field
    fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(fields);
        reader.note_unknown(Self::FIELDS);

        match Self::read(&mut reader) {
            Some(record) if reader.is_clean() => {
                debug!(record = %Self::KIND, "Record validated");
                Ok(record)
            }
            _ => {
                let errors = reader.into_errors(Self::KIND);
                debug!(
                    record = %Self::KIND,
                    fields = ?errors.field_names(),
                    "Record rejected"
                );
                Err(errors)
            }
        }
    }

    fn from_value(value: &Value) -> Result<Self, ValidationErrors> {
        match value.as_object() {
            Some(fields) => Self::from_fields(fields),
            None => Err(whole_payload_error(
                Self::KIND,
                UserValidationError::InvalidType("an object"),
            )),
        }
    }

    fn from_json(json: &str) -> Result<Self, ValidationErrors> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            whole_payload_error(Self::KIND, UserValidationError::MalformedJson(e.to_string()))
        })?;
        Self::from_value(&value)
    }
}

/// Successfully validated payload of any kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedRecord {
    UserBase(UserBase),
    UserCreate(UserCreate),
    UserUpdate(UserUpdate),
    UserResponse(UserResponse),
    UserListResponse(UserListResponse),
    LoginRequest(LoginRequest),
}

impl ValidatedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::UserBase(_) => RecordKind::UserBase,
            Self::UserCreate(_) => RecordKind::UserCreate,
            Self::UserUpdate(_) => RecordKind::UserUpdate,
            Self::UserResponse(_) => RecordKind::UserResponse,
            Self::UserListResponse(_) => RecordKind::UserListResponse,
            Self::LoginRequest(_) => RecordKind::LoginRequest,
        }
    }
}

/// Validate a raw payload as the given record kind
pub fn validate(kind: RecordKind, raw: &Value) -> Result<ValidatedRecord, ValidationErrors> {
    match kind {
        RecordKind::UserBase => UserBase::from_value(raw).map(ValidatedRecord::UserBase),
        RecordKind::UserCreate => UserCreate::from_value(raw).map(ValidatedRecord::UserCreate),
        RecordKind::UserUpdate => UserUpdate::from_value(raw).map(ValidatedRecord::UserUpdate),
        RecordKind::UserResponse => {
            UserResponse::from_value(raw).map(ValidatedRecord::UserResponse)
        }
        RecordKind::UserListResponse => {
            UserListResponse::from_value(raw).map(ValidatedRecord::UserListResponse)
        }
        RecordKind::LoginRequest => {
            LoginRequest::from_value(raw).map(ValidatedRecord::LoginRequest)
        }
    }
}

/// Parse and validate a JSON document as the given record kind
pub fn validate_json(kind: RecordKind, json: &str) -> Result<ValidatedRecord, ValidationErrors> {
    let raw: Value = serde_json::from_str(json)
        .map_err(|e| whole_payload_error(kind, UserValidationError::MalformedJson(e.to_string())))?;
    validate(kind, &raw)
}
