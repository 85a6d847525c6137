// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::translate_db_error,
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::{
        auth::User,
        profiles::{Merchandiser, Superviseur},
    },
};

const USER_COLUMNS: &str = "id, nom, email, password_hash, is_active, created_at, role_id";

// O que o serviço entrega para gravar um usuário (a senha já vem com hash)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nom: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i32,
}

/// Usuários e os perfis de campo (supervisor / merchandiser) ligados a eles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
    async fn create_user(&self, new_user: &NewUser) -> Result<User, AppError>;
    async fn list_users(&self, page: Pagination) -> Result<Vec<User>, AppError>;

    async fn find_superviseur(&self, id: i32) -> Result<Option<Superviseur>, AppError>;
    async fn find_superviseur_by_user(&self, user_id: i32) -> Result<Option<Superviseur>, AppError>;
    async fn has_superviseurs(&self) -> Result<bool, AppError>;
    async fn create_superviseur(&self, user_id: i32) -> Result<Superviseur, AppError>;

    async fn find_merchandiser_by_user(&self, user_id: i32) -> Result<Option<Merchandiser>, AppError>;
    async fn create_merchandiser(
        &self,
        user_id: i32,
        zone_geographique: Option<&str>,
        manager_id: Option<i32>,
    ) -> Result<Merchandiser, AppError>;
}

// O repositório de usuários sobre o Postgres
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (nom, email, password_hash, role_id) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.nom)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role_id)
        .fetch_one(&self.pool)
        .await
        // Violação de chave única vira DuplicateEntity (corrida com a checagem prévia)
        .map_err(|e| translate_db_error(e, Entity::User))
    }

    async fn list_users(&self, page: Pagination) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC OFFSET $1 LIMIT $2"
        ))
        .bind(page.offset())
        .bind(page.bounded_limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_superviseur(&self, id: i32) -> Result<Option<Superviseur>, AppError> {
        let superviseur = sqlx::query_as::<_, Superviseur>("SELECT id, user_id FROM superviseurs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(superviseur)
    }

    async fn find_superviseur_by_user(&self, user_id: i32) -> Result<Option<Superviseur>, AppError> {
        let superviseur = sqlx::query_as::<_, Superviseur>("SELECT id, user_id FROM superviseurs WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(superviseur)
    }

    async fn has_superviseurs(&self) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM superviseurs)")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn create_superviseur(&self, user_id: i32) -> Result<Superviseur, AppError> {
        sqlx::query_as::<_, Superviseur>("INSERT INTO superviseurs (user_id) VALUES ($1) RETURNING id, user_id")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| translate_db_error(e, Entity::Superviseur))
    }

    async fn find_merchandiser_by_user(&self, user_id: i32) -> Result<Option<Merchandiser>, AppError> {
        let merchandiser = sqlx::query_as::<_, Merchandiser>(
            "SELECT id, user_id, zone_geographique, manager_id FROM merchandisers WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(merchandiser)
    }

    async fn create_merchandiser(
        &self,
        user_id: i32,
        zone_geographique: Option<&str>,
        manager_id: Option<i32>,
    ) -> Result<Merchandiser, AppError> {
        sqlx::query_as::<_, Merchandiser>(
            r#"
            INSERT INTO merchandisers (user_id, zone_geographique, manager_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, zone_geographique, manager_id
            "#,
        )
        .bind(user_id)
        .bind(zone_geographique)
        .bind(manager_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate_db_error(e, Entity::Merchandiser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn constraint_violations_become_domain_errors(pool: PgPool) {
        let repo = PgUserRepository::new(pool.clone());
        let new_user = NewUser {
            nom: "Awa".into(),
            email: "awa@exemple.com".into(),
            password_hash: "hash".into(),
            role_id: 42,
        };

        // Cargo inexistente: a FK de users.role_id
        assert!(matches!(repo.create_user(&new_user).await, Err(AppError::NotFound(Entity::Role))));

        let role_id: i32 = sqlx::query_scalar("INSERT INTO roles (nom) VALUES ('Merchandiser') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
        let user = repo.create_user(&NewUser { role_id, ..new_user.clone() }).await.unwrap();
        assert!(matches!(
            repo.create_user(&NewUser { role_id, ..new_user }).await,
            Err(AppError::DuplicateEntity(Entity::User))
        ));

        assert!(!repo.has_superviseurs().await.unwrap());
        repo.create_superviseur(user.id).await.unwrap();
        assert!(repo.has_superviseurs().await.unwrap());
        assert!(matches!(repo.create_superviseur(user.id).await, Err(AppError::DuplicateEntity(Entity::Superviseur))));
    }
}
