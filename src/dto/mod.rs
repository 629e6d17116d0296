pub mod candidate_dto;
pub mod scheduler_dto;
pub mod webhook_dto;
