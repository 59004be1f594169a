use crate::dto::field::FieldValue;
use crate::dto::user_dto::{SafeUser, UserPayload};
use crate::model::user::{Role, User, UserFields};
use crate::schema::{check_text, now, trimmed_text, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PERSON_NAME_MIN_LEN: usize = 2;
pub const PERSON_NAME_MAX_LEN: usize = 50;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username regex"));

/// `local@domain.tld` shape: no whitespace, a single `@`, and a dot inside the domain.
pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn is_username_charset(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Checks a user payload. The password is only required when `is_update` is false;
/// on updates it is length-checked if given.
pub fn validate_user(payload: &UserPayload, is_update: bool) -> ValidationResult {
    let mut errors = Vec::new();

    let username = check_text(
        &mut errors,
        "Username",
        payload.username.as_ref(),
        USERNAME_MIN_LEN,
        USERNAME_MAX_LEN,
    );
    if let Some(username) = username {
        if !is_username_charset(&username) {
            errors.push("Username can only contain letters, numbers, and underscores".to_string());
        }
    }

    match payload.email.as_ref().and_then(FieldValue::non_empty_str) {
        None => errors.push("Email is required and must be a string".to_string()),
        Some(email) if !is_email_shaped(email.trim()) => {
            errors.push("Email must be a valid email address".to_string())
        }
        Some(_) => {}
    }

    let password = payload.password.as_ref().and_then(FieldValue::non_empty_str);
    match (is_update, password) {
        (false, None) => errors.push("Password is required and must be a string".to_string()),
        (_, Some(password)) if password.chars().count() < PASSWORD_MIN_LEN => {
            errors.push("Password must be at least 8 characters long".to_string())
        }
        _ => {}
    }

    check_text(
        &mut errors,
        "First name",
        payload.first_name.as_ref(),
        PERSON_NAME_MIN_LEN,
        PERSON_NAME_MAX_LEN,
    );
    check_text(
        &mut errors,
        "Last name",
        payload.last_name.as_ref(),
        PERSON_NAME_MIN_LEN,
        PERSON_NAME_MAX_LEN,
    );

    if let Some(role) = payload.role.as_ref().filter(|r| r.is_truthy()) {
        if role.as_str().and_then(Role::parse).is_none() {
            errors.push("Role must be one of: admin, user, moderator".to_string());
        }
    }

    if let Some(active) = payload.is_active.as_ref() {
        if active.as_bool().is_none() {
            errors.push("isActive must be a boolean value".to_string());
        }
    }

    ValidationResult::from_errors(errors)
}

/// Normalizes user fields: trims, lower-cases username and email, stamps `updated_at`.
/// Password, role, isActive and profilePicture are carried only when present.
pub fn sanitize_user(payload: &UserPayload) -> UserFields {
    UserFields {
        username: trimmed_text(payload.username.as_ref()).to_lowercase(),
        email: trimmed_text(payload.email.as_ref()).to_lowercase(),
        first_name: trimmed_text(payload.first_name.as_ref()),
        last_name: trimmed_text(payload.last_name.as_ref()),
        updated_at: now(),
        password: payload
            .password
            .as_ref()
            .filter(|p| p.is_truthy())
            .map(FieldValue::to_text),
        role: payload
            .role
            .as_ref()
            .and_then(FieldValue::as_str)
            .and_then(Role::parse),
        is_active: payload.is_active.as_ref().map(FieldValue::is_truthy),
        profile_picture: payload
            .profile_picture
            .as_ref()
            .filter(|p| p.is_truthy())
            .map(|p| p.to_text().trim().to_string()),
    }
}

/// A new user document: role defaults to `user`, `is_active` to true.
pub fn create_user_document(payload: &UserPayload) -> User {
    let fields = sanitize_user(payload);
    let timestamp = now();
    User {
        id: None,
        username: fields.username,
        email: fields.email,
        password: fields.password.unwrap_or_default(),
        first_name: fields.first_name,
        last_name: fields.last_name,
        role: fields.role.unwrap_or_default(),
        is_active: fields.is_active.unwrap_or(true),
        last_login: None,
        profile_picture: fields.profile_picture,
        created_at: Some(timestamp.clone()),
        updated_at: Some(timestamp),
    }
}

/// Drops the password
pub fn create_safe_user(user: User) -> SafeUser {
    SafeUser {
        id: user.id.map(|id| id.to_hex()),
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role: user.role,
        is_active: user.is_active,
        last_login: user.last_login,
        profile_picture: user.profile_picture,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<FieldValue> {
        Some(FieldValue::Text(s.to_string()))
    }

    fn valid_payload() -> UserPayload {
        UserPayload {
            username: text("jane_doe"),
            email: text("jane@example.com"),
            password: text("secret123"),
            first_name: text("Jane"),
            last_name: text("Doe"),
            ..UserPayload::default()
        }
    }

    #[test]
    fn test_valid_user() {
        let result = validate_user(&valid_payload(), false);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_password_required_on_create_only() {
        let mut payload = valid_payload();
        payload.password = None;
        assert_eq!(
            validate_user(&payload, false).errors,
            vec!["Password is required and must be a string"]
        );
        assert!(validate_user(&payload, true).is_valid);

        payload.password = text("short");
        assert_eq!(
            validate_user(&payload, true).errors,
            vec!["Password must be at least 8 characters long"]
        );
    }

    #[test]
    fn test_username_rules() {
        let mut payload = valid_payload();
        payload.username = text("ab");
        assert_eq!(validate_user(&payload, false).errors, vec!["Username must be at least 3 characters long"]);

        payload.username = text("jane doe");
        assert_eq!(
            validate_user(&payload, false).errors,
            vec!["Username can only contain letters, numbers, and underscores"]
        );

        payload.username = text(&"u".repeat(51));
        assert_eq!(validate_user(&payload, false).errors, vec!["Username must be less than 50 characters"]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email_shaped("a@b.co"));
        assert!(is_email_shaped("first.last@mail.example.org"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("a@.b"));
        assert!(!is_email_shaped("a@b."));
        assert!(!is_email_shaped("@b.co"));
        assert!(!is_email_shaped("a b@c.de"));
        assert!(!is_email_shaped("a@b@c.de"));

        let mut payload = valid_payload();
        payload.email = text("not-an-email");
        assert_eq!(validate_user(&payload, false).errors, vec!["Email must be a valid email address"]);
    }

    #[test]
    fn test_optional_role_and_active_flag() {
        let mut payload = valid_payload();
        payload.role = text("moderator");
        payload.is_active = Some(FieldValue::Bool(false));
        assert!(validate_user(&payload, false).is_valid);

        payload.role = text("superuser");
        payload.is_active = text("yes");
        assert_eq!(
            validate_user(&payload, false).errors,
            vec!["Role must be one of: admin, user, moderator", "isActive must be a boolean value"]
        );

        payload.role = text("");
        payload.is_active = None;
        assert!(validate_user(&payload, false).is_valid);
    }

    #[test]
    fn test_every_missing_field_reported() {
        let result = validate_user(&UserPayload::default(), false);
        assert_eq!(result.errors.len(), 5);
        assert_eq!(result.errors[0], "Username is required and must be a string");
        assert_eq!(result.errors[4], "Last name is required and must be a string");
    }

    #[test]
    fn test_sanitize_lowercases_and_keeps_partial_fields() {
        let mut payload = valid_payload();
        payload.username = text("  Jane_Doe ");
        payload.email = text(" Jane@Example.COM ");
        payload.password = None;
        let fields = sanitize_user(&payload);
        assert_eq!(fields.username, "jane_doe");
        assert_eq!(fields.email, "jane@example.com");
        assert_eq!(fields.password, None);
        assert_eq!(fields.role, None);
        assert_eq!(fields.is_active, None);

        let doc = bson::to_document(&fields).unwrap();
        assert!(!doc.contains_key("password"));
        assert!(!doc.contains_key("role"));
    }

    #[test]
    fn test_create_user_document_defaults() {
        let user = create_user_document(&valid_payload());
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);
        assert_eq!(user.password, "secret123");
        assert!(user.created_at.is_some());
        assert!(user.id.is_none());
    }

    #[test]
    fn test_safe_user_has_no_password() {
        let mut user = create_user_document(&valid_payload());
        user.id = Some(bson::oid::ObjectId::new());
        let json = serde_json::to_value(create_safe_user(user.clone())).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["_id"], user.id.unwrap().to_hex());
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["role"], "user");
        assert_eq!(json["isActive"], true);
    }
}
