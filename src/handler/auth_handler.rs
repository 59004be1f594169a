use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

use crate::dto::user_dto::{LoginRequest, RegisterRequest};
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind, ServiceError};


// Login
pub async fn login_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if payload.validate().is_err() {
        return Err(HandlerError::text(
            HandlerErrorKind::BadRequest,
            "Username and password are required",
        ));
    }
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = service.login(&username, &password).await.map_err(|e| match e {
        ServiceError::Unauthorized(msg) => HandlerError::text(HandlerErrorKind::Unauthorized, msg),
        other => {
            error!("Error during login: {}", other);
            HandlerError::text(HandlerErrorKind::Internal, "Error during login")
        }
    })?;
    Ok(Json(user))
}


// Register
pub async fn register_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = service.register(payload.into()).await.map_err(|e| match e {
        // Only the first message goes back to the client.
        ServiceError::Validation(errors) => HandlerError::text(
            HandlerErrorKind::Validation,
            errors.into_iter().next().unwrap_or_default(),
        ),
        ServiceError::Conflict(msg) => HandlerError::text(HandlerErrorKind::Conflict, msg),
        other => {
            error!("Error creating user: {}", other);
            HandlerError::text(HandlerErrorKind::Internal, "Error creating user")
        }
    })?;
    Ok(Json(user))
}
