pub mod agent;
pub mod user;
pub mod write_result;
