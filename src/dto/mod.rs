pub mod agent_dto;
pub mod field;
pub mod user_dto;
