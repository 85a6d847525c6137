// src/db/role_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::translate_db_error,
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::auth::Role,
};

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, nom: &str) -> Result<Option<Role>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, AppError>;
    async fn create_role(&self, nom: &str, description: Option<&str>) -> Result<Role, AppError>;
    async fn list_roles(&self, page: Pagination) -> Result<Vec<Role>, AppError>;
}

#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_by_name(&self, nom: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT id, nom, description FROM roles WHERE nom = $1")
            .bind(nom)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT id, nom, description FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    async fn create_role(&self, nom: &str, description: Option<&str>) -> Result<Role, AppError> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (nom, description) VALUES ($1, $2) RETURNING id, nom, description",
        )
        .bind(nom)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate_db_error(e, Entity::Role))
    }

    async fn list_roles(&self, page: Pagination) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT id, nom, description FROM roles ORDER BY id ASC OFFSET $1 LIMIT $2",
        )
        .bind(page.offset())
        .bind(page.bounded_limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }
}
