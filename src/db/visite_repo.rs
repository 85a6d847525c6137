// src/db/visite_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::translate_db_error,
        error::{AppError, Entity},
        pagination::Pagination,
    },
    models::visite::{
        LigneCommande, LigneCommandeCreate, NewVisite, ReleveStock, ReleveStockCreate, Visite,
        VisiteDetail, STATUT_SOUMIS,
    },
};

const VISITE_COLUMNS: &str = "id, merchandiser_id, client_id, date_visite, heure_arrivee, heure_depart, statut_validation, observations_generales";
const RELEVE_COLUMNS: &str = "id, visite_id, produit_id, quantite_en_stock, est_en_rupture";
const LIGNE_COLUMNS: &str = "id, visite_id, produit_id, quantite_commandee";

#[async_trait]
pub trait VisiteRepository: Send + Sync {
    /// Grava a visita e todos os filhos de forma atômica: ou tudo, ou nada.
    async fn create_visite(
        &self,
        visite: &NewVisite,
        releves: &[ReleveStockCreate],
        lignes: &[LigneCommandeCreate],
    ) -> Result<VisiteDetail, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<VisiteDetail>, AppError>;

    async fn list_visites(&self, page: Pagination) -> Result<Vec<Visite>, AppError>;
}

#[derive(Clone)]
pub struct PgVisiteRepository {
    pool: PgPool,
}

impl PgVisiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_releves<'e, E>(
        &self,
        executor: E,
        visite_id: i32,
        releves: &[ReleveStockCreate],
    ) -> Result<Vec<ReleveStock>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produit_ids: Vec<i32> = releves.iter().map(|r| r.produit_id).collect();
        let quantites: Vec<i32> = releves.iter().map(|r| r.quantite_en_stock).collect();
        let ruptures: Vec<bool> = releves.iter().map(|r| r.est_en_rupture).collect();

        // Inserção em massa usando UNNEST; a ordem das linhas segue a da lista recebida
        let mut rows = sqlx::query_as::<_, ReleveStock>(&format!(
            r#"
            INSERT INTO releves_stock (visite_id, produit_id, quantite_en_stock, est_en_rupture)
            SELECT $1, r.produit_id, r.quantite, r.rupture
            FROM UNNEST($2::int4[], $3::int4[], $4::bool[]) WITH ORDINALITY AS r(produit_id, quantite, rupture, ord)
            ORDER BY r.ord
            RETURNING {RELEVE_COLUMNS}
            "#
        ))
        .bind(visite_id)
        .bind(&produit_ids)
        .bind(&quantites)
        .bind(&ruptures)
        .fetch_all(executor)
        .await
        .map_err(|e| translate_db_error(e, Entity::Visite))?;

        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn insert_lignes<'e, E>(
        &self,
        executor: E,
        visite_id: i32,
        lignes: &[LigneCommandeCreate],
    ) -> Result<Vec<LigneCommande>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produit_ids: Vec<i32> = lignes.iter().map(|l| l.produit_id).collect();
        let quantites: Vec<i32> = lignes.iter().map(|l| l.quantite_commandee).collect();

        let mut rows = sqlx::query_as::<_, LigneCommande>(&format!(
            r#"
            INSERT INTO lignes_commande (visite_id, produit_id, quantite_commandee)
            SELECT $1, l.produit_id, l.quantite
            FROM UNNEST($2::int4[], $3::int4[]) WITH ORDINALITY AS l(produit_id, quantite, ord)
            ORDER BY l.ord
            RETURNING {LIGNE_COLUMNS}
            "#
        ))
        .bind(visite_id)
        .bind(&produit_ids)
        .bind(&quantites)
        .fetch_all(executor)
        .await
        .map_err(|e| translate_db_error(e, Entity::Visite))?;

        rows.sort_by_key(|l| l.id);
        Ok(rows)
    }
}

#[async_trait]
impl VisiteRepository for PgVisiteRepository {
    async fn create_visite(
        &self,
        visite: &NewVisite,
        releves: &[ReleveStockCreate],
        lignes: &[LigneCommandeCreate],
    ) -> Result<VisiteDetail, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 1. O pai primeiro: os filhos precisam do id gerado
        let parent = sqlx::query_as::<_, Visite>(&format!(
            r#"
            INSERT INTO visites (
                merchandiser_id, client_id, date_visite,
                heure_arrivee, heure_depart, observations_generales, statut_validation
            )
            VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4, $5, $6, $7)
            RETURNING {VISITE_COLUMNS}
            "#
        ))
        .bind(visite.merchandiser_id)
        .bind(visite.client_id)
        .bind(visite.date_visite)
        .bind(visite.heure_arrivee)
        .bind(visite.heure_depart)
        .bind(&visite.observations_generales)
        .bind(STATUT_SOUMIS)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| translate_db_error(e, Entity::Visite))?; // Se falhar, o tx sofre rollback no drop

        // 2. Os filhos, carimbados com o id do pai, em um lote por tabela
        let releves_stock = if releves.is_empty() {
            Vec::new()
        } else {
            self.insert_releves(&mut *tx, parent.id, releves).await?
        };

        let lignes_commande = if lignes.is_empty() {
            Vec::new()
        } else {
            self.insert_lignes(&mut *tx, parent.id, lignes).await?
        };

        // 3. Tudo certo: commit
        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        Ok(VisiteDetail { visite: parent, releves_stock, lignes_commande })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<VisiteDetail>, AppError> {
        let Some(visite) = sqlx::query_as::<_, Visite>(&format!("SELECT {VISITE_COLUMNS} FROM visites WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let releves_stock = sqlx::query_as::<_, ReleveStock>(&format!(
            "SELECT {RELEVE_COLUMNS} FROM releves_stock WHERE visite_id = $1 ORDER BY id ASC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let lignes_commande = sqlx::query_as::<_, LigneCommande>(&format!(
            "SELECT {LIGNE_COLUMNS} FROM lignes_commande WHERE visite_id = $1 ORDER BY id ASC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(VisiteDetail { visite, releves_stock, lignes_commande }))
    }

    async fn list_visites(&self, page: Pagination) -> Result<Vec<Visite>, AppError> {
        let visites = sqlx::query_as::<_, Visite>(&format!(
            "SELECT {VISITE_COLUMNS} FROM visites ORDER BY id ASC OFFSET $1 LIMIT $2"
        ))
        .bind(page.offset())
        .bind(page.bounded_limit())
        .fetch_all(&self.pool)
        .await?;
        Ok(visites)
    }
}
