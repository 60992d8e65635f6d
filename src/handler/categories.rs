// handler/categories.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::categorydb::CategoryExt,
    dtos::{
        categorydtos::{CreateCategoryDto, UpdateCategoryDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::{admin_only, auth},
    AppState,
};

pub fn categories_handler() -> Router {
    let admin_routes = Router::new()
        .route("/", post(create_category))
        .route("/:category_id", put(update_category))
        .layer(middleware::from_fn(admin_only))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/", get(list_categories))
        .merge(admin_routes)
}

pub async fn list_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state
        .db_client
        .get_categories(true)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Categories retrieved successfully",
        categories,
    )))
}

pub async fn create_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_category_by_name(&body.name)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::conflict("Category already exists"));
    }

    let category = app_state
        .db_client
        .create_category(body.name, body.icon, body.color, body.subcategories)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Category created successfully",
        category,
    )))
}

pub async fn update_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
    Json(body): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let category = app_state
        .db_client
        .update_category(
            category_id,
            body.icon,
            body.color,
            body.subcategories,
            body.is_active,
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Category not found"),
            other => HttpError::server_error(other.to_string()),
        })?;

    Ok(Json(ApiResponse::success(
        "Category updated successfully",
        category,
    )))
}
