use crate::dto::user_dto::{SafeUser, UserPayload};
use crate::repository::user_repo::UserRepository;
use crate::schema::user_schema::{create_safe_user, create_user_document, validate_user};
use crate::util::error::ServiceError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const USERNAME_TAKEN: &str = "Username already exists";

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<SafeUser, ServiceError>;
    async fn register(&self, payload: UserPayload) -> Result<SafeUser, ServiceError>;
}

pub struct AuthServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl AuthServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    /// Unknown usernames and wrong passwords produce the same error.
    #[instrument(skip(self, password), fields(username = %username))]
    async fn login(&self, username: &str, password: &str) -> Result<SafeUser, ServiceError> {
        let Some(user) = self.user_repo.find_by_username(username).await? else {
            warn!("Login for unknown user");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };
        if !PasswordUtilsImpl::verify_password(password, &user.password) {
            warn!("Login with wrong password");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        info!("User logged in");
        Ok(create_safe_user(user))
    }

    /// The username check and the insert are separate round trips; two concurrent
    /// registrations can both pass the check unless the collection has a unique index.
    #[instrument(skip(self, payload))]
    async fn register(&self, payload: UserPayload) -> Result<SafeUser, ServiceError> {
        let validation = validate_user(&payload, false);
        if !validation.is_valid {
            warn!(errors = ?validation.errors, "Rejected registration");
            return Err(ServiceError::Validation(validation.errors));
        }

        // Looked up as sent, before the lower-casing applied to the stored document.
        let username = payload.username.as_ref().and_then(|u| u.as_str()).unwrap_or_default();
        if self.user_repo.find_by_username(username).await?.is_some() {
            warn!(username, "Username already registered");
            return Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let mut user = create_user_document(&payload);
        let inserted = self.user_repo.insert(user.clone()).await.map_err(|e| match ServiceError::from(e) {
            ServiceError::Conflict(_) => ServiceError::Conflict(USERNAME_TAKEN.to_string()),
            other => other,
        })?;
        user.id = ObjectId::parse_str(&inserted.inserted_id).ok();
        info!(user_id = %inserted.inserted_id, "User registered");
        Ok(create_safe_user(user))
    }
}
