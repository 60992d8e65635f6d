// handler/users.rs
use std::sync::Arc;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::{
        userdtos::{FilterUserDto, RegisterResponseDto, RegisterUserDto, UpsertProfileDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::{auth, JWTAuthMiddeware},
    models::usermodel::UserRole,
    utils::token,
    AppState,
};

pub fn users_handler() -> Router {
    let protected = Router::new()
        .route("/me", get(get_me))
        .route("/profiles", get(get_my_profiles).put(upsert_profile))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/register", post(register_user))
        .merge(protected)
}

pub async fn register_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_user(None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::conflict("Email is already registered"));
    }

    let user = app_state
        .db_client
        .save_user(body.name, body.email, body.role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "User registered successfully",
        RegisterResponseDto {
            user: FilterUserDto::filter_user(&user),
            token,
        },
    )))
}

pub async fn get_me(
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(ApiResponse::success(
        "User retrieved successfully",
        FilterUserDto::filter_user(&auth.user),
    )))
}

pub async fn get_my_profiles(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let profiles = app_state
        .db_client
        .get_professional_profiles(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Profiles retrieved successfully",
        profiles,
    )))
}

pub async fn upsert_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpsertProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.role != UserRole::Professional {
        return Err(HttpError::forbidden(
            "Only professionals can configure coverage profiles",
        ));
    }

    let profile = app_state
        .db_client
        .upsert_professional_profile(
            auth.user.id,
            body.category,
            body.zones,
            body.subcategories,
            body.is_active,
            body.bio,
            body.experience_years,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Profile saved successfully",
        profile,
    )))
}
