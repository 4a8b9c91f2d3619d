//! User field validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use uuid::Uuid;
use validator::ValidateEmail;

use super::error::UserValidationError;

pub const MIN_NICKNAME_LENGTH: usize = 3;

/// Schemes accepted for profile URLs
pub const ALLOWED_URL_SCHEMES: [&str; 2] = ["http", "https"];

/// Any character outside the nickname alphabet
static NICKNAME_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("nickname pattern is valid"));

/// Validate a nickname
///
/// Rules:
/// - Cannot be empty
/// - Minimum 3 characters
/// - Only ASCII letters, digits, underscores, and hyphens
pub fn validate_nickname(nickname: &str) -> Result<(), UserValidationError> {
    if nickname.is_empty() {
        return Err(UserValidationError::EmptyNickname);
    }

    if nickname.chars().count() < MIN_NICKNAME_LENGTH {
        return Err(UserValidationError::NicknameTooShort(MIN_NICKNAME_LENGTH));
    }

    if let Some(bad) = NICKNAME_DISALLOWED
        .find(nickname)
        .and_then(|m| m.as_str().chars().next())
    {
        return Err(UserValidationError::InvalidNicknameCharacter(bad));
    }

    Ok(())
}

/// Validate an email address (`local-part@domain`)
///
/// On top of the syntax check the domain must be a dotted host name with at
/// least two non-empty labels; bare hosts and `[...]` IP literals are rejected.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if !email.validate_email() {
        return Err(UserValidationError::InvalidEmail);
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return Err(UserValidationError::InvalidEmail);
    };

    if domain.starts_with('[') || !has_dotted_domain(domain) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

fn has_dotted_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Validate a profile URL
///
/// Absence is handled by the caller; this checks a present value. The empty
/// string is rejected rather than treated as unset.
pub fn validate_profile_url(url: &str) -> Result<(), UserValidationError> {
    if url.is_empty() {
        return Err(UserValidationError::EmptyUrl);
    }

    let parsed = Url::parse(url).map_err(|e| UserValidationError::InvalidUrl(e.to_string()))?;

    if !ALLOWED_URL_SCHEMES.contains(&parsed.scheme()) {
        return Err(UserValidationError::UnsupportedUrlScheme(
            parsed.scheme().to_string(),
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UserValidationError::InvalidUrl("missing host".to_string()));
    }

    Ok(())
}

/// Parse a user identifier
pub fn parse_user_id(id: &str) -> Result<Uuid, UserValidationError> {
    Uuid::parse_str(id).map_err(|e| UserValidationError::InvalidUuid(e.to_string()))
}
