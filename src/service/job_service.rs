// service/job_service.rs
use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{categorydb::CategoryExt, db::DBClient, jobdb::JobExt, userdb::UserExt},
    dtos::jobdtos::CreateJobDto,
    models::jobmodel::{Job, JobStatus},
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct JobService {
    db_client: Arc<DBClient>,
}

impl JobService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Create a service request. The category must exist and be active; a
    /// subcategory, when given, must belong to that category.
    pub async fn create_job(
        &self,
        client_id: Uuid,
        job_data: CreateJobDto,
    ) -> Result<Job, ServiceError> {
        if job_data.title.trim().is_empty() {
            return Err(ServiceError::Validation("Title is required".to_string()));
        }

        let category = self
            .db_client
            .get_category_by_name(&job_data.category)
            .await?
            .ok_or_else(|| ServiceError::CategoryNotFound(job_data.category.clone()))?;

        if !category.is_active.unwrap_or(true) {
            return Err(ServiceError::Validation(format!(
                "Category {:?} is not active",
                category.name
            )));
        }

        if let Some(sub) = job_data.subcategory.as_deref() {
            if !category.has_subcategory(sub) {
                return Err(ServiceError::Validation(format!(
                    "Subcategory {:?} does not belong to category {:?}",
                    sub, category.name
                )));
            }
        }

        let budget = match job_data.budget {
            Some(b) => Some(BigDecimal::try_from(b).map_err(|_| {
                ServiceError::Validation("Budget must be a finite number".to_string())
            })?),
            None => None,
        };

        let job = self
            .db_client
            .create_job(
                client_id,
                job_data.title,
                job_data.description,
                job_data.category,
                job_data.subcategory,
                job_data.location,
                budget,
                job_data.images,
            )
            .await?;

        tracing::info!(job_id = %job.id, client_id = %client_id, "job created");

        Ok(job)
    }

    pub async fn list_jobs_for_client(&self, client_id: Uuid) -> Result<Vec<Job>, ServiceError> {
        Ok(self.db_client.get_jobs_by_client(client_id).await?)
    }

    /// The professional's feed: pending jobs matching one of their active
    /// profiles by category, subcategory and zone, excluding jobs they have
    /// already closed out. The candidate set is narrowed in SQL by category
    /// and terminal-interaction exclusion; the zone/subcategory predicate is
    /// applied here as a pure function over the profile records.
    pub async fn list_jobs_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Job>, ServiceError> {
        let profiles = self
            .db_client
            .get_professional_profiles(professional_id)
            .await?;

        let active: Vec<_> = profiles
            .into_iter()
            .filter(|p| p.is_active.unwrap_or(true))
            .collect();

        if active.is_empty() {
            return Ok(Vec::new());
        }

        let categories: Vec<String> = active.iter().map(|p| p.category.clone()).collect();

        let candidates = self
            .db_client
            .get_candidate_jobs_for_professional(professional_id, &categories)
            .await?;

        let jobs = candidates
            .into_iter()
            .filter(|job| {
                active.iter().any(|profile| {
                    profile.matches_job(&job.category, job.subcategory.as_deref(), &job.location)
                })
            })
            .collect();

        Ok(jobs)
    }

    /// Lifecycle moves driven by explicit client action: cancellation and
    /// completion. Quote acceptance moves the job through
    /// `InteractionService::accept_offer` instead, inside its transaction.
    pub async fn set_status(
        &self,
        job_id: Uuid,
        client_id: Uuid,
        target: JobStatus,
    ) -> Result<Job, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.client_id != client_id {
            return Err(ServiceError::Forbidden(client_id, job_id));
        }

        let current = job.status_or_default();
        if !current.can_transition_to(target) {
            return Err(ServiceError::InvalidJobTransition {
                job: job_id,
                from: current,
                to: target,
            });
        }

        let updated = self.db_client.update_job_status(job_id, target).await?;

        tracing::info!(
            job_id = %job_id,
            from = current.to_str(),
            to = target.to_str(),
            "job status changed"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn job_service_compiles() {
        let pool = PgPool::connect_lazy("postgres://localhost/profix").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = JobService::new(db_client);

        let _ = svc.list_jobs_for_client(Uuid::nil());
    }
}
