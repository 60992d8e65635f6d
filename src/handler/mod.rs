pub mod categories;
pub mod chat;
pub mod jobs;
pub mod users;
