// src/handlers/visites.rs

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
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::visite::{Visite, VisiteCreate, VisiteDetail},
};

// POST /visites/
#[utoipa::path(
    post,
    path = "/visites/",
    tag = "Visites",
    request_body = VisiteCreate,
    responses(
        (status = 201, description = "Visita criada com relevés e linhas de pedido", body = VisiteDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "O usuário não é merchandiser"),
        (status = 404, description = "Cliente ou produto inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_visite(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<VisiteCreate>,
) -> Result<impl IntoResponse, ApiError> {
    // Validação padrão + consistência dos horários
    payload
        .validate_all()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let visite = app_state
        .visite_service
        .create_visite(&user, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(visite)))
}

// GET /visites/
#[utoipa::path(
    get,
    path = "/visites/",
    tag = "Visites",
    params(Pagination),
    responses((status = 200, description = "Lista de visitas (sem os detalhes)", body = Vec<Visite>)),
    security(("api_jwt" = []))
)]
pub async fn list_visites(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let visites = app_state
        .visite_service
        .list_visites(page)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(visites))
}

// GET /visites/{id}
#[utoipa::path(
    get,
    path = "/visites/{id}",
    tag = "Visites",
    params(("id" = i32, Path, description = "Id da visita")),
    responses(
        (status = 200, description = "Visita com os detalhes", body = VisiteDetail),
        (status = 404, description = "Visita inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_visite(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let visite = app_state
        .visite_service
        .get_visite(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(visite))
}
