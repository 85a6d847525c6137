// src/handlers/roles.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        pagination::Pagination,
    },
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{Role, RoleCreate},
};

// POST /roles/
#[utoipa::path(
    post,
    path = "/roles/",
    tag = "Rôles",
    request_body = RoleCreate,
    responses(
        (status = 201, description = "Cargo criado", body = Role),
        (status = 400, description = "Dados inválidos ou cargo já existente")
    )
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RoleCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let role = app_state
        .role_service
        .create_role(payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(role)))
}

// GET /roles/
#[utoipa::path(
    get,
    path = "/roles/",
    tag = "Rôles",
    params(Pagination),
    responses((status = 200, description = "Lista de cargos", body = Vec<Role>))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let roles = app_state
        .role_service
        .list_roles(page)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(roles))
}

// GET /roles/{id}
#[utoipa::path(
    get,
    path = "/roles/{id}",
    tag = "Rôles",
    params(("id" = i32, Path, description = "Id do cargo")),
    responses(
        (status = 200, description = "Cargo", body = Role),
        (status = 404, description = "Cargo inexistente")
    )
)]
pub async fn get_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let role = app_state
        .role_service
        .get_role(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(role))
}
