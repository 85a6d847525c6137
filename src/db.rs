use std::sync::Arc;

use sqlx::PgPool;

pub mod client_repo;
pub use client_repo::{ClientRepository, PgClientRepository};
pub mod produit_repo;
pub use produit_repo::{PgProduitRepository, ProduitRepository};
pub mod role_repo;
pub use role_repo::{PgRoleRepository, RoleRepository};
pub mod user_repo;
pub use user_repo::{NewUser, PgUserRepository, UserRepository};
pub mod visite_repo;
pub use visite_repo::{PgVisiteRepository, VisiteRepository};

#[cfg(test)]
pub mod memory;

/// Os repositórios que os serviços recebem, atrás dos seus traits.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub produits: Arc<dyn ProduitRepository>,
    pub visites: Arc<dyn VisiteRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            roles: Arc::new(PgRoleRepository::new(pool.clone())),
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            produits: Arc::new(PgProduitRepository::new(pool.clone())),
            visites: Arc::new(PgVisiteRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            users: store.clone(),
            roles: store.clone(),
            clients: store.clone(),
            produits: store.clone(),
            visites: store,
        }
    }
}
