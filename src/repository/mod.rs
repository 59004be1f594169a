pub mod mongo_gateway;
pub mod record_repo;
pub mod repository_error;
pub mod user_repo;
