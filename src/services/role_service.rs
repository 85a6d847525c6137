// src/services/role_service.rs

use std::sync::Arc;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
    },
    db::RoleRepository,
    models::auth::{Role, RoleCreate},
};

#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    pub async fn create_role(&self, payload: RoleCreate) -> Result<Role, AppError> {
        if self.roles.find_by_name(&payload.nom).await?.is_some() {
            return Err(AppError::DuplicateEntity(Entity::Role));
        }

        let role = self
            .roles
            .create_role(&payload.nom, payload.description.as_deref())
            .await?;

        tracing::info!(role_id = role.id, "Rôle créé");
        Ok(role)
    }

    pub async fn get_role(&self, id: i32) -> Result<Role, AppError> {
        self.roles.find_by_id(id).await?.ok_or(AppError::NotFound(Entity::Role))
    }

    pub async fn list_roles(&self, page: Pagination) -> Result<Vec<Role>, AppError> {
        self.roles.list_roles(page).await
    }
}
