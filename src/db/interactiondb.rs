// db/interactiondb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::interactionmodel::{
    InteractionStatus, JobInteraction, JobInteractionWithProfessional,
};

#[async_trait]
pub trait InteractionExt {
    async fn get_interaction(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Option<JobInteraction>, Error>;

    /// Upsert on first engagement: creates the row at `new` if absent,
    /// otherwise returns the existing row untouched. At most one row can
    /// exist per (job, professional).
    async fn upsert_interaction(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<JobInteraction, Error>;

    /// Guarded write: only applies when the row is still in `from`, so a
    /// stale read-validate-write loses to whatever committed in between.
    /// `None` means the row moved on (or vanished) since validation.
    async fn update_interaction_status(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
        from: InteractionStatus,
        to: InteractionStatus,
        has_unread: Option<bool>,
    ) -> Result<Option<JobInteraction>, Error>;

    async fn get_interactions_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobInteractionWithProfessional>, Error>;

    async fn clear_interaction_unread(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<(), Error>;
}

#[async_trait]
impl InteractionExt for DBClient {
    async fn get_interaction(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Option<JobInteraction>, Error> {
        sqlx::query_as::<_, JobInteraction>(
            r#"
            SELECT id, job_id, professional_id, status, has_unread, created_at, updated_at
            FROM job_interactions
            WHERE job_id = $1 AND professional_id = $2
            "#,
        )
        .bind(job_id)
        .bind(professional_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn upsert_interaction(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<JobInteraction, Error> {
        // The conflict arm is a no-op write so RETURNING yields the
        // existing row instead of nothing.
        sqlx::query_as::<_, JobInteraction>(
            r#"
            INSERT INTO job_interactions (job_id, professional_id, status)
            VALUES ($1, $2, 'new')
            ON CONFLICT (job_id, professional_id)
            DO UPDATE SET job_id = EXCLUDED.job_id
            RETURNING id, job_id, professional_id, status, has_unread, created_at, updated_at
            "#,
        )
        .bind(job_id)
        .bind(professional_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_interaction_status(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
        from: InteractionStatus,
        to: InteractionStatus,
        has_unread: Option<bool>,
    ) -> Result<Option<JobInteraction>, Error> {
        sqlx::query_as::<_, JobInteraction>(
            r#"
            UPDATE job_interactions
            SET status = $4,
                has_unread = COALESCE($5, has_unread),
                updated_at = NOW()
            WHERE job_id = $1 AND professional_id = $2 AND status = $3
            RETURNING id, job_id, professional_id, status, has_unread, created_at, updated_at
            "#,
        )
        .bind(job_id)
        .bind(professional_id)
        .bind(from)
        .bind(to)
        .bind(has_unread)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_interactions_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobInteractionWithProfessional>, Error> {
        sqlx::query_as::<_, JobInteractionWithProfessional>(
            r#"
            SELECT i.id, i.job_id, i.professional_id, i.status, i.has_unread, i.updated_at,
                   u.name AS professional_name, u.email AS professional_email
            FROM job_interactions i
            JOIN users u ON u.id = i.professional_id
            WHERE i.job_id = $1
            ORDER BY i.updated_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn clear_interaction_unread(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE job_interactions
            SET has_unread = FALSE, updated_at = NOW()
            WHERE job_id = $1 AND professional_id = $2
            "#,
        )
        .bind(job_id)
        .bind(professional_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
