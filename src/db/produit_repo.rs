// src/db/produit_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{
        db_utils::translate_db_error,
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::catalog::{Produit, ProduitCreate},
};

#[async_trait]
pub trait ProduitRepository: Send + Sync {
    async fn create_produit(&self, produit: &ProduitCreate) -> Result<Produit, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Produit>, AppError>;
    async fn list_produits(&self, page: Pagination) -> Result<Vec<Produit>, AppError>;
}

#[derive(Clone)]
pub struct PgProduitRepository {
    pool: PgPool,
}

impl PgProduitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProduitRepository for PgProduitRepository {
    async fn create_produit(&self, produit: &ProduitCreate) -> Result<Produit, AppError> {
        sqlx::query_as::<_, Produit>(
            "INSERT INTO produits (nom_produit, marque) VALUES ($1, $2) RETURNING id, nom_produit, marque",
        )
        .bind(&produit.nom_produit)
        .bind(&produit.marque)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate_db_error(e, Entity::Produit))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Produit>, AppError> {
        let produit = sqlx::query_as::<_, Produit>("SELECT id, nom_produit, marque FROM produits WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(produit)
    }

    async fn list_produits(&self, page: Pagination) -> Result<Vec<Produit>, AppError> {
        let produits = sqlx::query_as::<_, Produit>(
            "SELECT id, nom_produit, marque FROM produits ORDER BY id ASC OFFSET $1 LIMIT $2",
        )
        .bind(page.offset())
        .bind(page.bounded_limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(produits)
    }
}
