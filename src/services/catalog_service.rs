// src/services/catalog_service.rs

use std::sync::Arc;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::Pagination,
    },
    db::{ClientRepository, ProduitRepository},
    models::catalog::{Client, ClientCreate, Produit, ProduitCreate},
};

/// Dados de referência: clientes (pontos de venda) e produtos.
#[derive(Clone)]
pub struct CatalogService {
    clients: Arc<dyn ClientRepository>,
    produits: Arc<dyn ProduitRepository>,
}

impl CatalogService {
    pub fn new(clients: Arc<dyn ClientRepository>, produits: Arc<dyn ProduitRepository>) -> Self {
        Self { clients, produits }
    }

    // --- CLIENTES ---

    pub async fn create_client(&self, payload: &ClientCreate, createur_id: i32) -> Result<Client, AppError> {
        let client = self.clients.create_client(payload, createur_id).await?;
        tracing::info!(client_id = client.id, createur_id, "Client créé");
        Ok(client)
    }

    pub async fn get_client(&self, id: i32) -> Result<Client, AppError> {
        self.clients.find_by_id(id).await?.ok_or(AppError::NotFound(Entity::Client))
    }

    pub async fn list_clients(&self, page: Pagination) -> Result<Vec<Client>, AppError> {
        self.clients.list_clients(page).await
    }

    // --- PRODUTOS ---

    pub async fn create_produit(&self, payload: &ProduitCreate) -> Result<Produit, AppError> {
        let produit = self.produits.create_produit(payload).await?;
        tracing::info!(produit_id = produit.id, "Produit créé");
        Ok(produit)
    }

    pub async fn get_produit(&self, id: i32) -> Result<Produit, AppError> {
        self.produits.find_by_id(id).await?.ok_or(AppError::NotFound(Entity::Produit))
    }

    pub async fn list_produits(&self, page: Pagination) -> Result<Vec<Produit>, AppError> {
        self.produits.list_produits(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, Repositories, RoleRepository, UserRepository};

    async fn seed_user(repos: &Repositories) -> i32 {
        let role_id = repos.roles.create_role("Superviseur", None).await.unwrap().id;
        repos
            .users
            .create_user(&NewUser {
                nom: "Moussa".into(),
                email: "moussa@exemple.com".into(),
                password_hash: "hash".into(),
                role_id,
            })
            .await
            .unwrap()
            .id
    }

    fn client(nom: &str) -> ClientCreate {
        ClientCreate { nom_client: nom.into(), contact: None, typologie: Some("Épicerie".into()), localisation: None }
    }

    #[tokio::test]
    async fn listing_is_paginated_in_insertion_order() {
        let repos = Repositories::in_memory();
        let user_id = seed_user(&repos).await;
        let catalog = CatalogService::new(repos.clients.clone(), repos.produits.clone());

        catalog.create_client(&client("Premier"), user_id).await.unwrap();
        catalog.create_client(&client("Second"), user_id).await.unwrap();

        let page = catalog.list_clients(Pagination::new(0, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].nom_client, "Premier");

        let next = catalog.list_clients(Pagination::new(1, 1)).await.unwrap();
        assert_eq!(next[0].nom_client, "Second");
    }

    #[tokio::test]
    async fn client_records_its_creator() {
        let repos = Repositories::in_memory();
        let user_id = seed_user(&repos).await;
        let catalog = CatalogService::new(repos.clients.clone(), repos.produits.clone());

        let created = catalog.create_client(&client("Boutique"), user_id).await.unwrap();
        assert_eq!(catalog.get_client(created.id).await.unwrap().createur_id, Some(user_id));
    }

    #[tokio::test]
    async fn produits_roundtrip_and_missing_is_not_found() {
        let repos = Repositories::in_memory();
        let catalog = CatalogService::new(repos.clients.clone(), repos.produits.clone());

        let produit = catalog
            .create_produit(&ProduitCreate { nom_produit: "Lait caillé".into(), marque: Some("Kirène".into()) })
            .await
            .unwrap();

        assert_eq!(catalog.get_produit(produit.id).await.unwrap().marque.as_deref(), Some("Kirène"));
        assert!(matches!(catalog.get_produit(404).await, Err(AppError::NotFound(Entity::Produit))));
    }
}
