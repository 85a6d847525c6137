// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::catalog::Client;

// Representa um cargo vindo do banco (tabela `roles`)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Role {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Merchandiser")]
    pub nom: String,

    #[schema(example = "Agent de terrain chargé des visites")]
    pub description: Option<String>,
}

// Representa um usuário vindo do banco (tabela `users`)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub nom: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub role_id: Option<i32>,
}

// Resposta de /users/me/: o usuário com o cargo e os clientes que ele cadastrou
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub nom: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub role: Option<Role>,
    pub clients_crees: Vec<Client>,
}

impl UserProfile {
    pub fn new(user: User, role: Option<Role>, clients_crees: Vec<Client>) -> Self {
        Self {
            id: user.id,
            nom: user.nom,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
            role,
            clients_crees,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoleCreate {
    #[validate(length(min = 1, max = 50, message = "Le nom du rôle doit contenir entre 1 et 50 caractères."))]
    #[schema(example = "Merchandiser")]
    pub nom: String,

    pub description: Option<String>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserCreate {
    #[validate(email(message = "L'email fourni est invalide."))]
    #[schema(example = "awa@exemple.com")]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Le nom doit contenir entre 1 et 100 caractères."))]
    #[schema(example = "Awa Diallo")]
    pub nom: String,

    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,

    #[schema(example = 1)]
    pub role_id: i32,
}

// Formulário OAuth2 "password" de POST /token
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    #[schema(example = "awa@exemple.com")]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self { access_token, token_type: "bearer".to_string() }
    }
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (e-mail do usuário)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued At
    pub jti: String, // Identificador do token, útil para correlacionar logs
}
