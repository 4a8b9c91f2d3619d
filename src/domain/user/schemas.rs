//! User payload records
//!
//! Each record reads its fields through a [`FieldReader`], so every field is
//! checked even after an earlier one fails.

use serde::Serialize;
use uuid::Uuid;

use super::fields::FieldReader;
use super::record::{RecordKind, Schema};
use super::role::UserRole;
use super::validation::parse_user_id;

/// Field rules: check, then take ownership of the accepted value
mod rules {
    use crate::domain::user::error::UserValidationError;
    use crate::domain::user::password::validate_password_complexity;
    use crate::domain::user::role::UserRole;
    use crate::domain::user::validation::{validate_email, validate_nickname, validate_profile_url};

    pub fn nickname(raw: &str) -> Result<String, UserValidationError> {
        validate_nickname(raw)?;
        Ok(raw.to_string())
    }

    pub fn email(raw: &str) -> Result<String, UserValidationError> {
        validate_email(raw)?;
        Ok(raw.to_string())
    }

    pub fn profile_url(raw: &str) -> Result<String, UserValidationError> {
        validate_profile_url(raw)?;
        Ok(raw.to_string())
    }

    pub fn strong_password(raw: &str) -> Result<String, UserValidationError> {
        Ok(validate_password_complexity(raw)?.to_string())
    }

    pub fn role(raw: &str) -> Result<UserRole, UserValidationError> {
        raw.parse()
    }

    pub fn text(raw: &str) -> Result<String, UserValidationError> {
        Ok(raw.to_string())
    }
}

/// Fields shared by user payloads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBase {
    pub nickname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_profile_url: Option<String>,
}

impl Schema for UserBase {
    const KIND: RecordKind = RecordKind::UserBase;
    const FIELDS: &'static [&'static str] = &[
        "nickname",
        "email",
        "first_name",
        "last_name",
        "role",
        "bio",
        "profile_picture_url",
        "linkedin_profile_url",
        "github_profile_url",
    ];

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let nickname = reader.required("nickname", rules::nickname);
        let email = reader.required("email", rules::email);
        let first_name = reader.optional("first_name", rules::text);
        let last_name = reader.optional("last_name", rules::text);
        let role = reader.required("role", rules::role);
        let bio = reader.optional("bio", rules::text);
        let profile_picture_url = reader.optional("profile_picture_url", rules::profile_url);
        let linkedin_profile_url = reader.optional("linkedin_profile_url", rules::profile_url);
        let github_profile_url = reader.optional("github_profile_url", rules::profile_url);

        Some(Self {
            nickname: nickname?,
            email: email?,
            first_name: first_name?,
            last_name: last_name?,
            role: role?,
            bio: bio?,
            profile_picture_url: profile_picture_url?,
            linkedin_profile_url: linkedin_profile_url?,
            github_profile_url: github_profile_url?,
        })
    }
}

/// Sign-up payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCreate {
    #[serde(flatten)]
    pub user: UserBase,
    /// Plain-text password - never serialized
    #[serde(skip_serializing)]
    pub password: String,
}

impl Schema for UserCreate {
    const KIND: RecordKind = RecordKind::UserCreate;
    const FIELDS: &'static [&'static str] = &[
        "nickname",
        "email",
        "first_name",
        "last_name",
        "role",
        "bio",
        "profile_picture_url",
        "linkedin_profile_url",
        "github_profile_url",
        "password",
    ];

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let user = UserBase::read(reader);
        let password = reader.required("password", rules::strong_password);

        Some(Self {
            user: user?,
            password: password?,
        })
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_profile_url: Option<String>,
}

impl UserUpdate {
    /// True when the update carries no changes
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Schema for UserUpdate {
    const KIND: RecordKind = RecordKind::UserUpdate;
    const FIELDS: &'static [&'static str] = UserBase::FIELDS;

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let nickname = reader.optional("nickname", rules::nickname);
        let email = reader.optional("email", rules::email);
        let first_name = reader.optional("first_name", rules::text);
        let last_name = reader.optional("last_name", rules::text);
        let role = reader.optional("role", rules::role);
        let bio = reader.optional("bio", rules::text);
        let profile_picture_url = reader.optional("profile_picture_url", rules::profile_url);
        let linkedin_profile_url = reader.optional("linkedin_profile_url", rules::profile_url);
        let github_profile_url = reader.optional("github_profile_url", rules::profile_url);

        Some(Self {
            nickname: nickname?,
            email: email?,
            first_name: first_name?,
            last_name: last_name?,
            role: role?,
            bio: bio?,
            profile_picture_url: profile_picture_url?,
            linkedin_profile_url: linkedin_profile_url?,
            github_profile_url: github_profile_url?,
        })
    }
}

/// Reference to a related resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub method: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            method: method.into(),
        }
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let rel = reader.required("rel", rules::text);
        let href = reader.required("href", rules::text);
        let method = reader.required("method", rules::text);

        Some(Self {
            rel: rel?,
            href: href?,
            method: method?,
        })
    }
}

/// User as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub role: UserRole,
    pub email: String,
    pub links: Vec<Link>,
}

impl Schema for UserResponse {
    const KIND: RecordKind = RecordKind::UserResponse;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "nickname",
        "first_name",
        "last_name",
        "role",
        "email",
        "links",
    ];

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required("id", parse_user_id);
        let nickname = reader.required("nickname", rules::nickname);
        let first_name = reader.optional("first_name", rules::text);
        let last_name = reader.optional("last_name", rules::text);
        let role = reader.required("role", rules::role);
        let email = reader.required("email", rules::email);
        let links = reader.nested_list("links", false, Link::read);

        Some(Self {
            id: id?,
            nickname: nickname?,
            first_name: first_name?,
            last_name: last_name?,
            role: role?,
            email: email?,
            links: links?,
        })
    }
}

/// One page of users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl Schema for UserListResponse {
    const KIND: RecordKind = RecordKind::UserListResponse;
    const FIELDS: &'static [&'static str] = &["items", "total", "page", "size"];

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let items = reader.nested_list("items", true, UserResponse::read);
        let total = reader.required_count("total");
        let page = reader.required_count("page");
        let size = reader.required_count("size");

        Some(Self {
            items: items?,
            total: total?,
            page: page?,
            size: size?,
        })
    }
}

/// Credentials for signing in
///
/// The password is only checked for presence; complexity applies at sign-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl Schema for LoginRequest {
    const KIND: RecordKind = RecordKind::LoginRequest;
    const FIELDS: &'static [&'static str] = &["email", "password"];

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let email = reader.required("email", rules::email);
        let password = reader.required("password", rules::text);

        Some(Self {
            email: email?,
            password: password?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserValidationError;
    use rstest::{fixture, rstest};
    use serde_json::{json, Value};

    #[fixture]
    fn user_base_data() -> Value {
        json!({
            "nickname": "john_doe_123",
            "email": "john.doe@example.com",
            "first_name": "John",
            "last_name": "Doe",
            "role": "AUTHENTICATED",
            "bio": "I am a software engineer with over 5 years of experience.",
            "profile_picture_url": "https://example.com/profile_pictures/john_doe.jpg",
            "linkedin_profile_url": "https://linkedin.com/in/johndoe",
            "github_profile_url": "https://github.com/johndoe"
        })
    }

    #[fixture]
    fn user_create_data(user_base_data: Value) -> Value {
        let mut data = user_base_data;
        data["password"] = json!("SecurePassword123!");
        data
    }

    #[fixture]
    fn user_update_data() -> Value {
        json!({
            "email": "john.doe.new@example.com",
            "nickname": "j_doe",
            "first_name": "John",
            "last_name": "Doe",
            "bio": "I specialize in backend development with Python and Node.js.",
            "profile_picture_url": "https://example.com/profile_pictures/john_doe_updated.jpg"
        })
    }

    #[fixture]
    fn user_response_data() -> Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "nickname": "john_doe_123",
            "first_name": "John",
            "last_name": "Doe",
            "role": "AUTHENTICATED",
            "email": "john.doe@example.com",
            "links": []
        })
    }

    #[fixture]
    fn login_request_data() -> Value {
        json!({ "email": "john_doe_123@emai.com", "password": "SecurePassword123!@" })
    }

    fn remove(mut data: Value, field: &str) -> Value {
        data.as_object_mut().unwrap().remove(field);
        data
    }

    // UserBase

    #[rstest]
    fn test_user_base_valid(user_base_data: Value) {
        let user = UserBase::from_value(&user_base_data).unwrap();
        assert_eq!(user.nickname, "john_doe_123");
        assert_eq!(user.email, "john.doe@example.com");
        assert_eq!(user.role, UserRole::Authenticated);
        assert_eq!(
            user.github_profile_url.as_deref(),
            Some("https://github.com/johndoe")
        );
    }

    #[rstest]
    #[case("test_user")]
    #[case("test-user")]
    #[case("testuser123")]
    #[case("123test")]
    fn test_user_base_nickname_valid(mut user_base_data: Value, #[case] value: &str) {
        user_base_data["nickname"] = json!(value);
        let user = UserBase::from_value(&user_base_data).unwrap();
        assert_eq!(user.nickname, value);
    }

    #[rstest]
    #[case("test user")]
    #[case("test?user")]
    #[case("")]
    #[case("us")]
    fn test_user_base_nickname_invalid(mut user_base_data: Value, #[case] value: &str) {
        user_base_data["nickname"] = json!(value);
        let errors = UserBase::from_value(&user_base_data).unwrap_err();
        assert_eq!(errors.field_names(), vec!["nickname"]);
    }

    #[rstest]
    #[case(json!("http://valid.com/profile.jpg"))]
    #[case(json!("https://valid.com/profile.png"))]
    #[case(Value::Null)]
    fn test_user_base_url_valid(mut user_base_data: Value, #[case] value: Value) {
        user_base_data["profile_picture_url"] = value.clone();
        let user = UserBase::from_value(&user_base_data).unwrap();
        assert_eq!(
            user.profile_picture_url.as_deref(),
            value.as_str()
        );
    }

    #[rstest]
    #[case("ftp://invalid.com/profile.jpg")]
    #[case("http//invalid")]
    #[case("https//invalid")]
    #[case("mailto://email@example.com")]
    #[case("data:image/png;base64")]
    fn test_user_base_url_invalid(mut user_base_data: Value, #[case] value: &str) {
        user_base_data["profile_picture_url"] = json!(value);
        let errors = UserBase::from_value(&user_base_data).unwrap_err();
        assert!(errors.contains("profile_picture_url"));
    }

    #[rstest]
    fn test_user_base_url_empty_string(mut user_base_data: Value) {
        user_base_data["profile_picture_url"] = json!("");
        let errors = UserBase::from_value(&user_base_data).unwrap_err();
        assert_eq!(
            errors.reason_for("profile_picture_url"),
            Some(&UserValidationError::EmptyUrl)
        );
    }

    #[rstest]
    fn test_user_base_url_absent(user_base_data: Value) {
        let data = remove(user_base_data, "linkedin_profile_url");
        let user = UserBase::from_value(&data).unwrap();
        assert!(user.linkedin_profile_url.is_none());
    }

    #[rstest]
    fn test_user_base_multiple_invalid_fields(mut user_base_data: Value) {
        user_base_data["nickname"] = json!("a");
        user_base_data["email"] = json!("invalidemail");

        let errors = UserBase::from_value(&user_base_data).unwrap_err();
        assert_eq!(errors.field_names(), vec!["nickname", "email"]);
        assert_eq!(
            errors.reason_for("nickname"),
            Some(&UserValidationError::NicknameTooShort(3))
        );
    }

    #[rstest]
    #[case("nickname")]
    #[case("email")]
    #[case("role")]
    fn test_user_base_required_fields(user_base_data: Value, #[case] field: &str) {
        let errors = UserBase::from_value(&remove(user_base_data, field)).unwrap_err();
        assert_eq!(errors.reason_for(field), Some(&UserValidationError::Missing));
    }

    #[rstest]
    fn test_user_base_invalid_role(mut user_base_data: Value) {
        user_base_data["role"] = json!("ROOT");
        let errors = UserBase::from_value(&user_base_data).unwrap_err();
        assert_eq!(
            errors.reason_for("role"),
            Some(&UserValidationError::InvalidRole("ROOT".to_string()))
        );
    }

    #[rstest]
    fn test_user_base_ignores_unknown_fields(mut user_base_data: Value) {
        user_base_data["is_professional"] = json!(true);
        assert!(UserBase::from_value(&user_base_data).is_ok());
    }

    // UserCreate

    #[rstest]
    fn test_user_create_valid(user_create_data: Value) {
        let user = UserCreate::from_value(&user_create_data).unwrap();
        assert_eq!(user.user.nickname, "john_doe_123");
        assert_eq!(user.password, "SecurePassword123!");
    }

    #[rstest]
    fn test_user_create_missing_password(user_base_data: Value) {
        let errors = UserCreate::from_value(&user_base_data).unwrap_err();
        assert_eq!(errors.field_names(), vec!["password"]);
        assert_eq!(errors.reason_for("password"), Some(&UserValidationError::Missing));
    }

    #[rstest]
    fn test_user_create_weak_password(mut user_create_data: Value) {
        user_create_data["password"] = json!("weak");
        let errors = UserCreate::from_value(&user_create_data).unwrap_err();
        assert!(matches!(
            errors.reason_for("password"),
            Some(UserValidationError::WeakPassword(_))
        ));
    }

    #[rstest]
    fn test_user_create_reports_base_and_password_together(mut user_create_data: Value) {
        user_create_data["email"] = json!("nope");
        user_create_data["password"] = json!("Ab1!");
        let errors = UserCreate::from_value(&user_create_data).unwrap_err();
        assert_eq!(errors.field_names(), vec!["email", "password"]);
    }

    #[rstest]
    fn test_user_create_serialization_excludes_password(user_create_data: Value) {
        let user = UserCreate::from_value(&user_create_data).unwrap();
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["nickname"], "john_doe_123");
        assert_eq!(json["role"], "AUTHENTICATED");
        assert!(json.get("password").is_none());
    }

    // UserUpdate

    #[rstest]
    fn test_user_update_valid(user_update_data: Value) {
        let update = UserUpdate::from_value(&user_update_data).unwrap();
        assert_eq!(update.email.as_deref(), Some("john.doe.new@example.com"));
        assert_eq!(update.first_name.as_deref(), Some("John"));
        assert!(update.role.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_user_update_empty() {
        let update = UserUpdate::from_value(&json!({})).unwrap();
        assert!(update.is_empty());
    }

    #[rstest]
    fn test_user_update_applies_field_rules(mut user_update_data: Value) {
        user_update_data["nickname"] = json!("x y");
        user_update_data["profile_picture_url"] = json!("");
        let errors = UserUpdate::from_value(&user_update_data).unwrap_err();
        assert_eq!(errors.field_names(), vec!["nickname", "profile_picture_url"]);
    }

    // UserResponse

    #[rstest]
    fn test_user_response_valid(user_response_data: Value) {
        let user = UserResponse::from_value(&user_response_data).unwrap();
        assert_eq!(user.id.to_string(), user_response_data["id"].as_str().unwrap());
        assert!(user.links.is_empty());
    }

    #[rstest]
    fn test_user_response_links(mut user_response_data: Value) {
        user_response_data["links"] = json!([
            { "rel": "self", "href": "https://api.example.com/users/1", "method": "GET" },
            { "rel": "delete", "href": "https://api.example.com/users/1" }
        ]);
        let errors = UserResponse::from_value(&user_response_data).unwrap_err();
        assert_eq!(errors.field_names(), vec!["links[1].method"]);
    }

    #[rstest]
    fn test_user_response_links_default_empty(user_response_data: Value) {
        let user = UserResponse::from_value(&remove(user_response_data, "links")).unwrap();
        assert!(user.links.is_empty());
    }

    #[rstest]
    fn test_user_response_invalid_id(mut user_response_data: Value) {
        user_response_data["id"] = json!("1234");
        let errors = UserResponse::from_value(&user_response_data).unwrap_err();
        assert!(matches!(
            errors.reason_for("id"),
            Some(UserValidationError::InvalidUuid(_))
        ));
    }

    // UserListResponse

    #[rstest]
    fn test_user_list_response(user_response_data: Value) {
        let mut broken = user_response_data.clone();
        broken["email"] = json!("invalidemail");

        let page = json!({
            "items": [user_response_data.clone()],
            "total": 1,
            "page": 1,
            "size": 10,
        });
        let list = UserListResponse::from_value(&page).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.size, 10);

        let page = json!({ "items": [user_response_data, broken], "total": 2, "page": 1 });
        let errors = UserListResponse::from_value(&page).unwrap_err();
        assert_eq!(errors.field_names(), vec!["items[1].email", "size"]);
    }

    // LoginRequest

    #[rstest]
    fn test_login_request_valid(login_request_data: Value) {
        let login = LoginRequest::from_value(&login_request_data).unwrap();
        assert_eq!(login.email, "john_doe_123@emai.com");
        assert_eq!(login.password, "SecurePassword123!@");
    }

    #[rstest]
    #[case("email")]
    #[case("password")]
    fn test_login_request_missing_fields(login_request_data: Value, #[case] field: &str) {
        let errors = LoginRequest::from_value(&remove(login_request_data, field)).unwrap_err();
        assert_eq!(errors.field_names(), vec![field]);
    }

    #[rstest]
    #[case("john@localhost")]
    #[case("john@example")]
    #[case("john@[127.0.0.1]")]
    fn test_login_request_rejects_undotted_domain(
        mut login_request_data: Value,
        #[case] value: &str,
    ) {
        login_request_data["email"] = json!(value);
        let errors = LoginRequest::from_value(&login_request_data).unwrap_err();
        assert_eq!(errors.field_names(), vec!["email"]);
        assert_eq!(errors.reason_for("email"), Some(&UserValidationError::InvalidEmail));
    }

    #[test]
    fn test_login_request_does_not_check_complexity() {
        let login = json!({ "email": "john.doe@example.com", "password": "weak" });
        assert!(LoginRequest::from_value(&login).is_ok());
    }
}
