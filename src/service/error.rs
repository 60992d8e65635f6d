// service/error.rs
use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::HttpError,
    models::{interactionmodel::InteractionStatus, jobmodel::JobStatus},
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Job {job} cannot move from {from:?} to {to:?}")]
    InvalidJobTransition {
        job: Uuid,
        from: JobStatus,
        to: JobStatus,
    },

    #[error("Interaction for job {job} cannot move from {from:?} to {to:?}")]
    InvalidInteractionTransition {
        job: Uuid,
        from: InteractionStatus,
        to: InteractionStatus,
    },

    #[error("Professional {0} has no qualifying interaction on job {1}")]
    NotEligible(Uuid, Uuid),

    #[error("User {0} is not authorized to perform this action on {1}")]
    Forbidden(Uuid, Uuid),

    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Chat {0} not found")]
    ChatNotFound(Uuid),

    #[error("Category {0:?} not found")]
    CategoryNotFound(String),

    #[error("Interaction not found for job {0} and professional {1}")]
    InteractionNotFound(Uuid, Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::InvalidJobTransition { .. }
            | ServiceError::InvalidInteractionTransition { .. } => StatusCode::CONFLICT,

            ServiceError::NotEligible(_, _) => StatusCode::CONFLICT,

            ServiceError::Forbidden(_, _) => StatusCode::FORBIDDEN,

            ServiceError::JobNotFound(_)
            | ServiceError::ChatNotFound(_)
            | ServiceError::CategoryNotFound(_)
            | ServiceError::InteractionNotFound(_, _) => StatusCode::NOT_FOUND,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        HttpError::new(error.to_string(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_errors_map_to_conflict() {
        let err = ServiceError::InvalidInteractionTransition {
            job: Uuid::nil(),
            from: InteractionStatus::Won,
            to: InteractionStatus::Offered,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let http: HttpError = err.into();
        assert_eq!(http.status, StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_and_forbidden_map_to_their_codes() {
        assert_eq!(
            ServiceError::JobNotFound(Uuid::nil()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Forbidden(Uuid::nil(), Uuid::nil()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::Validation("empty".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
