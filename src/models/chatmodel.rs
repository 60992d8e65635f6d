// models/chatmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Clone, Deserialize, sqlx::FromRow)]
pub struct Chat {
    pub id: Uuid,
    pub job_id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Chat {
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.professional_id == user_id
    }

    /// The other side of the conversation, from `user_id`'s point of view.
    pub fn counterpart(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.client_id {
            Some(self.professional_id)
        } else if user_id == self.professional_id {
            Some(self.client_id)
        } else {
            None
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub is_read: Option<bool>, // Database has DEFAULT FALSE, can be NULL
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counterpart_resolves_both_directions() {
        let client = Uuid::new_v4();
        let pro = Uuid::new_v4();
        let chat = Chat {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            client_id: client,
            professional_id: pro,
            last_message_at: None,
            created_at: None,
        };

        assert_eq!(chat.counterpart(client), Some(pro));
        assert_eq!(chat.counterpart(pro), Some(client));
        assert_eq!(chat.counterpart(Uuid::new_v4()), None);
        assert!(chat.is_participant(client));
        assert!(!chat.is_participant(Uuid::new_v4()));
    }
}
