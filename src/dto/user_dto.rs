use crate::dto::field::{present, FieldValue};
use crate::model::user::Role;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Candidate user fields as checked by the user schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub role: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub is_active: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub profile_picture: Option<FieldValue>,
}

/// Body of POST /auth/register. Anything else in the body is ignored,
/// so a client cannot pick its own role.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<FieldValue>,
}

impl From<RegisterRequest> for UserPayload {
    fn from(req: RegisterRequest) -> Self {
        UserPayload {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            ..UserPayload::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// A user without its password, safe to send to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
