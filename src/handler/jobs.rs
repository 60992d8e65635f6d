// handler/jobs.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        jobdtos::{AcceptOfferResultDto, CreateJobDto, JobFeedItemDto, SetJobStatusDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::usermodel::UserRole,
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        // Job Store
        .route("/", post(create_job))
        .route("/client", get(list_client_jobs))
        .route("/feed", get(list_professional_feed))
        .route("/:job_id/status", put(set_job_status))
        // Interaction Tracker
        .route("/:job_id/view", post(record_view))
        .route("/:job_id/contact", post(record_contact))
        .route("/:job_id/offer", post(record_offer))
        .route("/:job_id/accept/:professional_id", put(accept_offer))
        .route("/:job_id/reject/:professional_id", put(reject_interaction))
        .route("/:job_id/archive", put(archive_interaction))
        .route("/:job_id/interactions", get(list_job_interactions))
        // Chat entry points
        .route("/:job_id/chat", post(open_own_chat))
        .route("/:job_id/chat/:professional_id", post(open_chat_with))
}

fn require_role(auth: &JWTAuthMiddeware, role: UserRole) -> Result<(), HttpError> {
    if auth.user.role != role {
        return Err(HttpError::forbidden(format!(
            "This action requires the {} role",
            role.to_str()
        )));
    }
    Ok(())
}

// Job Store handlers

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    require_role(&auth, UserRole::Client)?;

    let job = app_state
        .job_service
        .create_job(auth.user.id, body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Job created successfully", job)))
}

pub async fn list_client_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .job_service
        .list_jobs_for_client(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Jobs retrieved successfully",
        jobs,
    )))
}

pub async fn list_professional_feed(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    require_role(&auth, UserRole::Professional)?;

    let jobs = app_state
        .job_service
        .list_jobs_for_professional(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    let feed: Vec<JobFeedItemDto> = jobs.iter().map(JobFeedItemDto::from_job).collect();

    Ok(Json(ApiResponse::success(
        "Job feed retrieved successfully",
        feed,
    )))
}

pub async fn set_job_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<SetJobStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .job_service
        .set_status(job_id, auth.user.id, body.status)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Job status updated successfully",
        job,
    )))
}

// Interaction Tracker handlers

pub async fn record_view(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_role(&auth, UserRole::Professional)?;

    let interaction = app_state
        .interaction_service
        .record_view(job_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("View recorded", interaction)))
}

pub async fn record_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_role(&auth, UserRole::Professional)?;

    let interaction = app_state
        .interaction_service
        .record_contact(job_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Contact recorded", interaction)))
}

pub async fn record_offer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_role(&auth, UserRole::Professional)?;

    let interaction = app_state
        .interaction_service
        .record_offer(job_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Offer recorded", interaction)))
}

pub async fn accept_offer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((job_id, professional_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .interaction_service
        .accept_offer(job_id, professional_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Offer accepted",
        AcceptOfferResultDto {
            job: result.job,
            interactions: result.interactions,
        },
    )))
}

pub async fn reject_interaction(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((job_id, professional_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let interaction = app_state
        .interaction_service
        .reject(job_id, professional_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Interaction rejected", interaction)))
}

pub async fn archive_interaction(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_role(&auth, UserRole::Professional)?;

    let interaction = app_state
        .interaction_service
        .archive(job_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Interaction archived", interaction)))
}

pub async fn list_job_interactions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let interactions = app_state
        .interaction_service
        .list_for_job(job_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Interactions retrieved successfully",
        interactions,
    )))
}

// Chat entry points

pub async fn open_own_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    require_role(&auth, UserRole::Professional)?;

    let chat = app_state
        .chat_service
        .open_chat(job_id, auth.user.id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Chat opened", chat)))
}

pub async fn open_chat_with(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((job_id, professional_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .chat_service
        .open_chat(job_id, professional_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Chat opened", chat)))
}
