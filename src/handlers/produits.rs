// src/handlers/produits.rs

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
    models::catalog::{Produit, ProduitCreate},
};

// POST /produits/
#[utoipa::path(
    post,
    path = "/produits/",
    tag = "Produits",
    request_body = ProduitCreate,
    responses(
        (status = 201, description = "Produto criado", body = Produit),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_produit(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ProduitCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let produit = app_state
        .catalog_service
        .create_produit(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(produit)))
}

// GET /produits/
#[utoipa::path(
    get,
    path = "/produits/",
    tag = "Produits",
    params(Pagination),
    responses((status = 200, description = "Lista de produtos", body = Vec<Produit>)),
    security(("api_jwt" = []))
)]
pub async fn list_produits(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let produits = app_state
        .catalog_service
        .list_produits(page)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(produits))
}

// GET /produits/{id}
#[utoipa::path(
    get,
    path = "/produits/{id}",
    tag = "Produits",
    params(("id" = i32, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Produto", body = Produit),
        (status = 404, description = "Produto inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_produit(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let produit = app_state
        .catalog_service
        .get_produit(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(produit))
}
