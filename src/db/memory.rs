// src/db/memory.rs
//
// Armazenamento em memória usado pelos testes. Aplica as mesmas regras de
// unicidade e de chave estrangeira que o schema do Postgres.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    common::{
        error::{AppError, Entity},
        pagination::{Pagination, MAX_LIMIT},
    },
    db::{ClientRepository, NewUser, ProduitRepository, RoleRepository, UserRepository, VisiteRepository},
    models::{
        auth::{Role, User},
        catalog::{Client, ClientCreate, Produit, ProduitCreate},
        profiles::{Merchandiser, Superviseur},
        visite::{
            LigneCommande, LigneCommandeCreate, NewVisite, ReleveStock, ReleveStockCreate, Visite,
            VisiteDetail, STATUT_SOUMIS,
        },
    },
};

#[derive(Default)]
struct Tables {
    roles: Vec<Role>,
    users: Vec<User>,
    superviseurs: Vec<Superviseur>,
    merchandisers: Vec<Merchandiser>,
    clients: Vec<Client>,
    produits: Vec<Produit>,
    visites: Vec<Visite>,
    releves_stock: Vec<ReleveStock>,
    lignes_commande: Vec<LigneCommande>,
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        // Um teste que entrou em pânico segurando o lock não deve travar os outros
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, AppError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::DuplicateEntity(Entity::User));
        }
        if !t.roles.iter().any(|r| r.id == new_user.role_id) {
            return Err(AppError::NotFound(Entity::Role));
        }
        let user = User {
            id: next_id(t.users.len()),
            nom: new_user.nom.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            is_active: true,
            created_at: Utc::now(),
            role_id: Some(new_user.role_id),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self, page: Pagination) -> Result<Vec<User>, AppError> {
        Ok(page.window(&self.tables().users))
    }

    async fn find_superviseur(&self, id: i32) -> Result<Option<Superviseur>, AppError> {
        Ok(self.tables().superviseurs.iter().find(|s| s.id == id).cloned())
    }

    async fn find_superviseur_by_user(&self, user_id: i32) -> Result<Option<Superviseur>, AppError> {
        Ok(self.tables().superviseurs.iter().find(|s| s.user_id == user_id).cloned())
    }

    async fn has_superviseurs(&self) -> Result<bool, AppError> {
        Ok(!self.tables().superviseurs.is_empty())
    }

    async fn create_superviseur(&self, user_id: i32) -> Result<Superviseur, AppError> {
        let mut t = self.tables();
        if !t.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::NotFound(Entity::User));
        }
        if t.superviseurs.iter().any(|s| s.user_id == user_id) {
            return Err(AppError::DuplicateEntity(Entity::Superviseur));
        }
        let superviseur = Superviseur { id: next_id(t.superviseurs.len()), user_id };
        t.superviseurs.push(superviseur.clone());
        Ok(superviseur)
    }

    async fn find_merchandiser_by_user(&self, user_id: i32) -> Result<Option<Merchandiser>, AppError> {
        Ok(self.tables().merchandisers.iter().find(|m| m.user_id == user_id).cloned())
    }

    async fn create_merchandiser(
        &self,
        user_id: i32,
        zone_geographique: Option<&str>,
        manager_id: Option<i32>,
    ) -> Result<Merchandiser, AppError> {
        let mut t = self.tables();
        if !t.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::NotFound(Entity::User));
        }
        if let Some(manager_id) = manager_id {
            if !t.superviseurs.iter().any(|s| s.id == manager_id) {
                return Err(AppError::NotFound(Entity::Superviseur));
            }
        }
        if t.merchandisers.iter().any(|m| m.user_id == user_id) {
            return Err(AppError::DuplicateEntity(Entity::Merchandiser));
        }
        let merchandiser = Merchandiser {
            id: next_id(t.merchandisers.len()),
            user_id,
            zone_geographique: zone_geographique.map(str::to_string),
            manager_id,
        };
        t.merchandisers.push(merchandiser.clone());
        Ok(merchandiser)
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_by_name(&self, nom: &str) -> Result<Option<Role>, AppError> {
        Ok(self.tables().roles.iter().find(|r| r.nom == nom).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, AppError> {
        Ok(self.tables().roles.iter().find(|r| r.id == id).cloned())
    }

    async fn create_role(&self, nom: &str, description: Option<&str>) -> Result<Role, AppError> {
        let mut t = self.tables();
        if t.roles.iter().any(|r| r.nom == nom) {
            return Err(AppError::DuplicateEntity(Entity::Role));
        }
        let role = Role {
            id: next_id(t.roles.len()),
            nom: nom.to_string(),
            description: description.map(str::to_string),
        };
        t.roles.push(role.clone());
        Ok(role)
    }

    async fn list_roles(&self, page: Pagination) -> Result<Vec<Role>, AppError> {
        Ok(page.window(&self.tables().roles))
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create_client(&self, client: &ClientCreate, createur_id: i32) -> Result<Client, AppError> {
        let mut t = self.tables();
        if !t.users.iter().any(|u| u.id == createur_id) {
            return Err(AppError::NotFound(Entity::User));
        }
        let client = Client {
            id: next_id(t.clients.len()),
            nom_client: client.nom_client.clone(),
            contact: client.contact.clone(),
            typologie: client.typologie.clone(),
            localisation: client.localisation.clone(),
            createur_id: Some(createur_id),
        };
        t.clients.push(client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError> {
        Ok(self.tables().clients.iter().find(|c| c.id == id).cloned())
    }

    async fn list_clients(&self, page: Pagination) -> Result<Vec<Client>, AppError> {
        Ok(page.window(&self.tables().clients))
    }

    async fn list_by_createur(&self, user_id: i32) -> Result<Vec<Client>, AppError> {
        Ok(self
            .tables()
            .clients
            .iter()
            .filter(|c| c.createur_id == Some(user_id))
            .take(MAX_LIMIT as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProduitRepository for MemoryStore {
    async fn create_produit(&self, produit: &ProduitCreate) -> Result<Produit, AppError> {
        let mut t = self.tables();
        let produit = Produit {
            id: next_id(t.produits.len()),
            nom_produit: produit.nom_produit.clone(),
            marque: produit.marque.clone(),
        };
        t.produits.push(produit.clone());
        Ok(produit)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Produit>, AppError> {
        Ok(self.tables().produits.iter().find(|p| p.id == id).cloned())
    }

    async fn list_produits(&self, page: Pagination) -> Result<Vec<Produit>, AppError> {
        Ok(page.window(&self.tables().produits))
    }
}

#[async_trait]
impl VisiteRepository for MemoryStore {
    async fn create_visite(
        &self,
        visite: &NewVisite,
        releves: &[ReleveStockCreate],
        lignes: &[LigneCommandeCreate],
    ) -> Result<VisiteDetail, AppError> {
        let mut t = self.tables();

        // Todas as chaves estrangeiras antes de qualquer escrita: nada fica pela metade
        if !t.merchandisers.iter().any(|m| m.id == visite.merchandiser_id) {
            return Err(AppError::NotFound(Entity::Merchandiser));
        }
        if !t.clients.iter().any(|c| c.id == visite.client_id) {
            return Err(AppError::NotFound(Entity::Client));
        }
        let produit_ids = releves.iter().map(|r| r.produit_id).chain(lignes.iter().map(|l| l.produit_id));
        for produit_id in produit_ids {
            if !t.produits.iter().any(|p| p.id == produit_id) {
                return Err(AppError::NotFound(Entity::Produit));
            }
        }

        let parent = Visite {
            id: next_id(t.visites.len()),
            merchandiser_id: visite.merchandiser_id,
            client_id: visite.client_id,
            date_visite: visite.date_visite.unwrap_or_else(|| Utc::now().date_naive()),
            heure_arrivee: visite.heure_arrivee,
            heure_depart: visite.heure_depart,
            statut_validation: STATUT_SOUMIS.to_string(),
            observations_generales: visite.observations_generales.clone(),
        };
        t.visites.push(parent.clone());

        let mut releves_stock = Vec::with_capacity(releves.len());
        for releve in releves {
            let row = ReleveStock {
                id: next_id(t.releves_stock.len()),
                visite_id: parent.id,
                produit_id: releve.produit_id,
                quantite_en_stock: releve.quantite_en_stock,
                est_en_rupture: releve.est_en_rupture,
            };
            t.releves_stock.push(row.clone());
            releves_stock.push(row);
        }

        let mut lignes_commande = Vec::with_capacity(lignes.len());
        for ligne in lignes {
            let row = LigneCommande {
                id: next_id(t.lignes_commande.len()),
                visite_id: parent.id,
                produit_id: ligne.produit_id,
                quantite_commandee: ligne.quantite_commandee,
            };
            t.lignes_commande.push(row.clone());
            lignes_commande.push(row);
        }

        Ok(VisiteDetail { visite: parent, releves_stock, lignes_commande })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<VisiteDetail>, AppError> {
        let t = self.tables();
        let Some(visite) = t.visites.iter().find(|v| v.id == id).cloned() else {
            return Ok(None);
        };
        let releves_stock = t.releves_stock.iter().filter(|r| r.visite_id == id).cloned().collect();
        let lignes_commande = t.lignes_commande.iter().filter(|l| l.visite_id == id).cloned().collect();
        Ok(Some(VisiteDetail { visite, releves_stock, lignes_commande }))
    }

    async fn list_visites(&self, page: Pagination) -> Result<Vec<Visite>, AppError> {
        Ok(page.window(&self.tables().visites))
    }
}
