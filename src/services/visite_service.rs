// src/services/visite_service.rs

use std::sync::Arc;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
    },
    db::{UserRepository, VisiteRepository},
    models::{
        auth::User,
        visite::{Visite, VisiteCreate, VisiteDetail},
    },
};

#[derive(Clone)]
pub struct VisiteService {
    visites: Arc<dyn VisiteRepository>,
    users: Arc<dyn UserRepository>,
}

impl VisiteService {
    pub fn new(visites: Arc<dyn VisiteRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { visites, users }
    }

    /// Cria a visita com os relevés de estoque e as linhas de pedido.
    /// Só quem tem perfil de merchandiser pode registrar uma visita.
    pub async fn create_visite(&self, caller: &User, payload: VisiteCreate) -> Result<VisiteDetail, AppError> {
        let merchandiser = self
            .users
            .find_merchandiser_by_user(caller.id)
            .await?
            .ok_or(AppError::Forbidden(Entity::Merchandiser))?;

        // 1. Separa o pai das listas de filhos
        let (visite, releves, lignes) = payload.into_parts(merchandiser.id);

        // 2. Pai + filhos numa única transação (ver VisiteRepository::create_visite)
        let detail = self.visites.create_visite(&visite, &releves, &lignes).await?;

        tracing::info!(
            visite_id = detail.visite.id,
            merchandiser_id = merchandiser.id,
            releves = detail.releves_stock.len(),
            lignes = detail.lignes_commande.len(),
            "Visite enregistrée"
        );
        Ok(detail)
    }

    pub async fn get_visite(&self, id: i32) -> Result<VisiteDetail, AppError> {
        self.visites.find_by_id(id).await?.ok_or(AppError::NotFound(Entity::Visite))
    }

    pub async fn list_visites(&self, page: Pagination) -> Result<Vec<Visite>, AppError> {
        self.visites.list_visites(page).await
    }
}
