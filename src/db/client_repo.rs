// src/db/client_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::translate_db_error,
        error::{AppError, Entity},
        pagination::{Pagination, MAX_LIMIT},
    },
    models::catalog::{Client, ClientCreate},
};

const CLIENT_COLUMNS: &str = "id, nom_client, contact, typologie, localisation, createur_id";

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create_client(&self, client: &ClientCreate, createur_id: i32) -> Result<Client, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError>;
    async fn list_clients(&self, page: Pagination) -> Result<Vec<Client>, AppError>;
    /// Clientes cadastrados por um usuário (o `clients_crees` do perfil), no máximo `MAX_LIMIT`.
    async fn list_by_createur(&self, user_id: i32) -> Result<Vec<Client>, AppError>;
}

#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn create_client(&self, client: &ClientCreate, createur_id: i32) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO clients (nom_client, contact, typologie, localisation, createur_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(&client.nom_client)
        .bind(&client.contact)
        .bind(&client.typologie)
        .bind(&client.localisation)
        .bind(createur_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate_db_error(e, Entity::Client))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(&format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn list_clients(&self, page: Pagination) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id ASC OFFSET $1 LIMIT $2"
        ))
        .bind(page.offset())
        .bind(page.bounded_limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    async fn list_by_createur(&self, user_id: i32) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE createur_id = $1 ORDER BY id ASC LIMIT $2"
        ))
        .bind(user_id)
        .bind(MAX_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }
}
