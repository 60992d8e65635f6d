// models/jobmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Finished,
    Cancelled,
}

impl JobStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::Finished => "finished",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// Allowed lifecycle moves: pending -> in_progress (quote accepted),
    /// in_progress -> finished, pending|in_progress -> cancelled.
    pub fn can_transition_to(&self, target: JobStatus) -> bool {
        matches!(
            (self, target),
            (JobStatus::Pending, JobStatus::InProgress)
                | (JobStatus::InProgress, JobStatus::Finished)
                | (JobStatus::Pending, JobStatus::Cancelled)
                | (JobStatus::InProgress, JobStatus::Cancelled)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub location: String,
    pub budget: Option<BigDecimal>,
    pub images: Vec<String>,
    pub status: Option<JobStatus>, // Database has DEFAULT 'pending', can be NULL
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn status_or_default(&self) -> JobStatus {
        self.status.unwrap_or(JobStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_in_progress_or_cancelled() {
        assert!(JobStatus::Pending.can_transition_to(JobStatus::InProgress));
        assert!(JobStatus::Pending.can_transition_to(JobStatus::Cancelled));
        assert!(!JobStatus::Pending.can_transition_to(JobStatus::Finished));
    }

    #[test]
    fn in_progress_moves_to_finished_or_cancelled() {
        assert!(JobStatus::InProgress.can_transition_to(JobStatus::Finished));
        assert!(JobStatus::InProgress.can_transition_to(JobStatus::Cancelled));
        assert!(!JobStatus::InProgress.can_transition_to(JobStatus::Pending));
    }

    #[test]
    fn finished_and_cancelled_are_terminal() {
        for target in [
            JobStatus::Pending,
            JobStatus::InProgress,
            JobStatus::Finished,
            JobStatus::Cancelled,
        ] {
            assert!(!JobStatus::Finished.can_transition_to(target));
            assert!(!JobStatus::Cancelled.can_transition_to(target));
        }
    }

    #[test]
    fn no_self_transitions() {
        for status in [
            JobStatus::Pending,
            JobStatus::InProgress,
            JobStatus::Finished,
            JobStatus::Cancelled,
        ] {
            assert!(!status.can_transition_to(status));
        }
    }
}
