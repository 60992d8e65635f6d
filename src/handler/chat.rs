// handler/chat.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, userdb::UserExt},
    dtos::{
        chatdtos::{ChatParticipantDto, ChatWithDetailsDto, SendMessageDto},
        ApiResponse, PaginationQuery,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/", get(get_user_chats))
        .route("/unread-count", get(get_unread_count))
        .route("/:chat_id/messages", get(get_messages).post(send_message))
        .route("/:chat_id/read", put(mark_chat_as_read))
}

pub async fn get_user_chats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let (limit, offset) = pagination.limit_offset();

    let chats = app_state
        .chat_service
        .list_chats(auth.user.id, limit, offset)
        .await
        .map_err(HttpError::from)?;

    let mut details = Vec::with_capacity(chats.len());
    for chat in chats {
        let counterpart = match chat.counterpart(auth.user.id) {
            Some(other_id) => app_state
                .db_client
                .get_user(Some(other_id), None)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .map(|u| ChatParticipantDto {
                    id: u.id,
                    name: u.name,
                }),
            None => None,
        };

        let last_message = app_state
            .db_client
            .get_last_message(chat.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        details.push(ChatWithDetailsDto {
            chat,
            counterpart,
            last_message,
        });
    }

    Ok(Json(ApiResponse::success(
        "Chats retrieved successfully",
        details,
    )))
}

pub async fn get_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let (limit, offset) = pagination.limit_offset();

    let messages = app_state
        .chat_service
        .list_messages(chat_id, auth.user.id, limit, offset)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Messages retrieved successfully",
        messages,
    )))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let message = app_state
        .chat_service
        .send_message(chat_id, auth.user.id, &body.content)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Message sent", message)))
}

pub async fn mark_chat_as_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .chat_service
        .mark_read(chat_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Chat marked as read", ())))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .chat_service
        .unread_count(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Unread count retrieved successfully",
        count,
    )))
}
