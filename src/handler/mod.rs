pub mod auth_handler;
pub mod record_handler;
pub mod ui_handler;
