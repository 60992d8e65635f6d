// service/chat_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{chatdb::ChatExt, db::DBClient, interactiondb::InteractionExt, jobdb::JobExt},
    models::{
        chatmodel::{Chat, Message},
        interactionmodel::InteractionStatus,
    },
    service::{error::ServiceError, interaction_service::InteractionService},
};

#[derive(Debug, Clone)]
pub struct ChatService {
    db_client: Arc<DBClient>,
    interaction_service: Arc<InteractionService>,
}

impl ChatService {
    pub fn new(db_client: Arc<DBClient>, interaction_service: Arc<InteractionService>) -> Self {
        Self {
            db_client,
            interaction_service,
        }
    }

    /// Open (or return) the chat for a (job, professional) pair. Gated on
    /// the interaction having reached at least `contacted`; either side of
    /// the pair may open it.
    pub async fn open_chat(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
        actor_id: Uuid,
    ) -> Result<Chat, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if actor_id != job.client_id && actor_id != professional_id {
            return Err(ServiceError::Forbidden(actor_id, job_id));
        }

        let interaction = self
            .db_client
            .get_interaction(job_id, professional_id)
            .await?;

        let eligible = interaction
            .map(|i| i.status.allows_chat())
            .unwrap_or(false);

        if !eligible {
            return Err(ServiceError::NotEligible(professional_id, job_id));
        }

        Ok(self
            .db_client
            .create_or_get_chat(job_id, job.client_id, professional_id)
            .await?)
    }

    /// Append a message. A professional's message while the interaction is
    /// still at new/viewed is itself a contact event and advances it.
    pub async fn send_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, ServiceError> {
        let chat = self
            .db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        if !chat.is_participant(sender_id) {
            return Err(ServiceError::Forbidden(sender_id, chat_id));
        }

        let text = content.trim();
        if text.is_empty() {
            return Err(ServiceError::Validation(
                "Message text must not be empty".to_string(),
            ));
        }

        if sender_id == chat.professional_id {
            let interaction = self
                .db_client
                .get_interaction(chat.job_id, chat.professional_id)
                .await?;

            let needs_contact = matches!(
                interaction.map(|i| i.status),
                Some(InteractionStatus::New) | Some(InteractionStatus::Viewed)
            );

            if needs_contact {
                self.interaction_service
                    .record_contact(chat.job_id, chat.professional_id)
                    .await?;
            }
        }

        let message = self
            .db_client
            .insert_message(chat_id, sender_id, text.to_string())
            .await?;

        if let Some(recipient) = chat.counterpart(sender_id) {
            self.db_client.invalidate_unread_cache(recipient).await;
        }

        Ok(message)
    }

    /// Ordered history, oldest first. A restartable read, not a live feed.
    pub async fn list_messages(
        &self,
        chat_id: Uuid,
        actor_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, ServiceError> {
        let chat = self
            .db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        if !chat.is_participant(actor_id) {
            return Err(ServiceError::Forbidden(actor_id, chat_id));
        }

        Ok(self
            .db_client
            .get_chat_messages(chat_id, limit, offset)
            .await?)
    }

    pub async fn list_chats(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Chat>, ServiceError> {
        Ok(self.db_client.get_user_chats(user_id, limit, offset).await?)
    }

    /// Reader acknowledges the thread. When the client reads, the
    /// professional's `has_unread` flag on the interaction is cleared too.
    pub async fn mark_read(&self, chat_id: Uuid, reader_id: Uuid) -> Result<(), ServiceError> {
        let chat = self
            .db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        if !chat.is_participant(reader_id) {
            return Err(ServiceError::Forbidden(reader_id, chat_id));
        }

        self.db_client
            .mark_messages_as_read(chat_id, reader_id)
            .await?;

        if reader_id == chat.client_id {
            self.db_client
                .clear_interaction_unread(chat.job_id, chat.professional_id)
                .await?;
        }

        self.db_client.invalidate_unread_cache(reader_id).await;

        Ok(())
    }

    /// Unread message counter for a user's dashboard badge, cached in Redis
    /// when available.
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, ServiceError> {
        if let Some(redis_arc) = &self.db_client.redis_client {
            let key = format!("unread_count:{}", user_id);
            let mut conn = redis_arc.lock().await;

            let cached: Result<Option<i64>, redis::RedisError> =
                redis::cmd("GET").arg(&key).query_async(&mut *conn).await;

            if let Ok(Some(count)) = cached {
                return Ok(count);
            }
            drop(conn);

            let count = self.db_client.get_unread_count(user_id).await?;

            let mut conn = redis_arc.lock().await;
            let _: Result<(), redis::RedisError> = redis::cmd("SETEX")
                .arg(&key)
                .arg(60)
                .arg(count)
                .query_async(&mut *conn)
                .await;

            return Ok(count);
        }

        Ok(self.db_client.get_unread_count(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn chat_service_compiles() {
        let pool = PgPool::connect_lazy("postgres://localhost/profix").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let interactions = Arc::new(InteractionService::new(db_client.clone()));
        let svc = ChatService::new(db_client, interactions);

        let _ = svc.unread_count(Uuid::nil());
    }
}
