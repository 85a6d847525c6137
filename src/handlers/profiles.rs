// src/handlers/profiles.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::profiles::{Merchandiser, MerchandiserCreate, Superviseur, SuperviseurCreate},
};

// POST /superviseurs/
#[utoipa::path(
    post,
    path = "/superviseurs/",
    tag = "Profils",
    request_body = SuperviseurCreate,
    responses(
        (status = 201, description = "Perfil de supervisor criado", body = Superviseur),
        (status = 400, description = "O usuário já tem esse perfil"),
        (status = 403, description = "Já existe um supervisor e o chamador não é supervisor"),
        (status = 404, description = "Usuário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_superviseur(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SuperviseurCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let superviseur = app_state
        .profile_service
        .create_superviseur(&user, payload.user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(superviseur)))
}

// POST /merchandisers/
#[utoipa::path(
    post,
    path = "/merchandisers/",
    tag = "Profils",
    request_body = MerchandiserCreate,
    responses(
        (status = 201, description = "Perfil de merchandiser criado", body = Merchandiser),
        (status = 400, description = "Dados inválidos ou perfil já existente"),
        (status = 403, description = "O chamador não é supervisor"),
        (status = 404, description = "Usuário ou supervisor inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_merchandiser(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<MerchandiserCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let merchandiser = app_state
        .profile_service
        .create_merchandiser(&user, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(merchandiser)))
}
