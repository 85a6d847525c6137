// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
    },
    db::{ClientRepository, NewUser, RoleRepository, UserRepository},
    models::auth::{TokenResponse, User, UserCreate, UserProfile},
    services::token::TokenService,
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    clients: Arc<dyn ClientRepository>,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        clients: Arc<dyn ClientRepository>,
        tokens: TokenService,
        bcrypt_cost: u32,
    ) -> Self {
        Self { users, roles, clients, tokens, bcrypt_cost }
    }

    pub async fn register_user(&self, payload: UserCreate) -> Result<User, AppError> {
        // 1. Checagem prévia das chaves únicas / estrangeiras
        if self.users.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::DuplicateEntity(Entity::User));
        }
        if self.roles.find_by_id(payload.role_id).await?.is_none() {
            return Err(AppError::NotFound(Entity::Role));
        }

        // 2. Hashing em um thread separado (bcrypt é CPU-bound)
        let password = payload.password;
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 3. Grava
        let user = self
            .users
            .create_user(&NewUser {
                nom: payload.nom,
                email: payload.email,
                password_hash,
                role_id: payload.role_id,
            })
            .await?;

        tracing::info!(user_id = user.id, "Utilisateur créé");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::warn!("Tentativa de login com e-mail desconhecido");
            return Err(AppError::InvalidCredentials);
        };

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!(user_id = user.id, "Senha incorreta");
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.tokens.issue_access_token(&user.email)?;
        Ok(TokenResponse::bearer(access_token))
    }

    /// Resolve o portador do token. Usuário inexistente é tratado como token inválido.
    pub async fn current_user(&self, token: &str) -> Result<User, AppError> {
        let email = self.tokens.verify(token)?;

        match self.users.find_by_email(&email).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!("Token válido para um usuário que não existe mais");
                Err(AppError::InvalidToken)
            }
        }
    }

    /// O usuário com o cargo e os clientes que cadastrou.
    pub async fn user_profile(&self, user: User) -> Result<UserProfile, AppError> {
        let role = match user.role_id {
            Some(role_id) => self.roles.find_by_id(role_id).await?,
            None => None,
        };
        let clients_crees = self.clients.list_by_createur(user.id).await?;
        Ok(UserProfile::new(user, role, clients_crees))
    }

    pub async fn get_user(&self, id: i32) -> Result<User, AppError> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound(Entity::User))
    }

    pub async fn list_users(&self, page: Pagination) -> Result<Vec<User>, AppError> {
        self.users.list_users(page).await
    }
}
