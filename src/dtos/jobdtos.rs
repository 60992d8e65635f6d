// dtos/jobdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::JobStatus;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateJobDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub subcategory: Option<String>,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(range(min = 0.0, message = "Budget must be positive"))]
    pub budget: Option<f64>,

    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SetJobStatusDto {
    pub status: JobStatus,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AcceptOfferResultDto {
    pub job: crate::models::jobmodel::Job,
    pub interactions: Vec<crate::models::interactionmodel::JobInteraction>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JobFeedItemDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub location: String,
    pub budget: Option<f64>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl JobFeedItemDto {
    pub fn from_job(job: &crate::models::jobmodel::Job) -> Self {
        use num_traits::ToPrimitive;

        Self {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            category: job.category.clone(),
            subcategory: job.subcategory.clone(),
            location: job.location.clone(),
            budget: job.budget.as_ref().and_then(|b| b.to_f64()),
            created_at: job.created_at,
        }
    }
}
