use axum::{Router, routing::post};
use crate::handler::auth_handler::{login_handler, register_handler};
use std::sync::Arc;
use crate::service::auth_service::AuthServiceImpl;

pub fn auth_router(service: Arc<AuthServiceImpl>) -> Router {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/register", post(register_handler))
        .with_state(service)
}
