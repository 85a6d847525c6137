// src/handlers/auth.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        pagination::Pagination,
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{LoginForm, TokenResponse, User, UserCreate, UserProfile},
};

// POST /token (formulário OAuth2: username + password)
#[utoipa::path(
    post,
    path = "/token",
    tag = "Authentification",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token de acesso", body = TokenResponse),
        (status = 401, description = "E-mail ou senha incorretos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let token = app_state
        .auth_service
        .login(&form.username, &form.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(token))
}

// POST /users/
#[utoipa::path(
    post,
    path = "/users/",
    tag = "Utilisateurs",
    request_body = UserCreate,
    responses(
        (status = 201, description = "Usuário criado", body = UserProfile),
        (status = 400, description = "Dados inválidos ou e-mail já usado"),
        (status = 404, description = "Cargo inexistente")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<UserCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let user = app_state
        .auth_service
        .register_user(payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let profile = app_state
        .auth_service
        .user_profile(user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(profile)))
}

// GET /users/me/
#[utoipa::path(
    get,
    path = "/users/me/",
    tag = "Utilisateurs",
    responses(
        (status = 200, description = "O usuário do token", body = UserProfile),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .auth_service
        .user_profile(user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(profile))
}

// GET /users/
#[utoipa::path(
    get,
    path = "/users/",
    tag = "Utilisateurs",
    params(Pagination),
    responses((status = 200, description = "Lista de usuários", body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let users = app_state
        .auth_service
        .list_users(page)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(users))
}

// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Utilisateurs",
    params(("id" = i32, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Usuário", body = UserProfile),
        (status = 404, description = "Usuário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .auth_service
        .get_user(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let profile = app_state
        .auth_service
        .user_profile(user)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(profile))
}
