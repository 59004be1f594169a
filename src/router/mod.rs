pub mod auth_router;
pub mod record_router;
