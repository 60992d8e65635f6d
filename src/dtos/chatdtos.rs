// dtos/chatdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::chatmodel::{Chat, Message};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SendMessageDto {
    #[validate(length(min = 1, max = 2000, message = "Message must be between 1 and 2000 characters"))]
    pub content: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatParticipantDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ChatWithDetailsDto {
    pub chat: Chat,
    pub counterpart: Option<ChatParticipantDto>,
    pub last_message: Option<Message>,
}
