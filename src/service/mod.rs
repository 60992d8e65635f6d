pub mod chat_service;
pub mod error;
pub mod interaction_service;
pub mod job_service;
