// db/jobdb.rs
use async_trait::async_trait;
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Job, JobStatus};

#[async_trait]
pub trait JobExt {
    async fn create_job(
        &self,
        client_id: Uuid,
        title: String,
        description: String,
        category: String,
        subcategory: Option<String>,
        location: String,
        budget: Option<BigDecimal>,
        images: Vec<String>,
    ) -> Result<Job, Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    async fn get_jobs_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, Error>;

    /// Pending jobs in any of the given categories that the professional has
    /// not already closed out (no terminal interaction row for them).
    /// Zone/subcategory filtering against the professional's profiles happens
    /// in the service layer, over this candidate set.
    async fn get_candidate_jobs_for_professional(
        &self,
        professional_id: Uuid,
        categories: &[String],
    ) -> Result<Vec<Job>, Error>;

    async fn update_job_status(&self, job_id: Uuid, status: JobStatus) -> Result<Job, Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        client_id: Uuid,
        title: String,
        description: String,
        category: String,
        subcategory: Option<String>,
        location: String,
        budget: Option<BigDecimal>,
        images: Vec<String>,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
                (client_id, title, description, category, subcategory, location, budget, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, client_id, title, description, category, subcategory, location,
                      budget, images, status, created_at, updated_at
            "#,
        )
        .bind(client_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(subcategory)
        .bind(location)
        .bind(budget)
        .bind(images)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, client_id, title, description, category, subcategory, location,
                   budget, images, status, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_jobs_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, client_id, title, description, category, subcategory, location,
                   budget, images, status, created_at, updated_at
            FROM jobs
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_candidate_jobs_for_professional(
        &self,
        professional_id: Uuid,
        categories: &[String],
    ) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT j.id, j.client_id, j.title, j.description, j.category, j.subcategory,
                   j.location, j.budget, j.images, j.status, j.created_at, j.updated_at
            FROM jobs j
            WHERE j.status = 'pending'
              AND j.category = ANY($2)
              AND NOT EXISTS (
                  SELECT 1 FROM job_interactions i
                  WHERE i.job_id = j.id
                    AND i.professional_id = $1
                    AND i.status IN ('won', 'lost', 'rejected', 'archived')
              )
            ORDER BY j.created_at DESC
            "#,
        )
        .bind(professional_id)
        .bind(categories)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_job_status(&self, job_id: Uuid, status: JobStatus) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, client_id, title, description, category, subcategory, location,
                      budget, images, status, created_at, updated_at
            "#,
        )
        .bind(job_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }
}
