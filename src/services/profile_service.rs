// src/services/profile_service.rs

use std::sync::Arc;

use crate::{
    common::error::{AppError, Entity},
    db::UserRepository,
    models::{
        auth::User,
        profiles::{Merchandiser, MerchandiserCreate, Superviseur},
    },
};

/// Perfis de campo: um usuário pode ter no máximo um perfil de cada tipo.
/// Só supervisores criam perfis; o primeiro supervisor se cadastra com a tabela vazia.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create_superviseur(&self, caller: &User, user_id: i32) -> Result<Superviseur, AppError> {
        let is_superviseur = self.users.find_superviseur_by_user(caller.id).await?.is_some();
        if !is_superviseur && self.users.has_superviseurs().await? {
            tracing::warn!(caller_id = caller.id, "Criação de supervisor recusada");
            return Err(AppError::Forbidden(Entity::Superviseur));
        }

        self.ensure_user_exists(user_id).await?;
        if self.users.find_superviseur_by_user(user_id).await?.is_some() {
            return Err(AppError::DuplicateEntity(Entity::Superviseur));
        }

        let superviseur = self.users.create_superviseur(user_id).await?;
        tracing::info!(superviseur_id = superviseur.id, user_id, caller_id = caller.id, "Profil superviseur créé");
        Ok(superviseur)
    }

    /// Sem `manager_id`, o merchandiser fica subordinado ao supervisor que o cadastrou.
    pub async fn create_merchandiser(
        &self,
        caller: &User,
        payload: &MerchandiserCreate,
    ) -> Result<Merchandiser, AppError> {
        let Some(caller_superviseur) = self.users.find_superviseur_by_user(caller.id).await? else {
            tracing::warn!(caller_id = caller.id, "Criação de merchandiser recusada");
            return Err(AppError::Forbidden(Entity::Superviseur));
        };

        self.ensure_user_exists(payload.user_id).await?;
        let manager_id = match payload.manager_id {
            Some(manager_id) => {
                if self.users.find_superviseur(manager_id).await?.is_none() {
                    return Err(AppError::NotFound(Entity::Superviseur));
                }
                manager_id
            }
            None => caller_superviseur.id,
        };
        if self.users.find_merchandiser_by_user(payload.user_id).await?.is_some() {
            return Err(AppError::DuplicateEntity(Entity::Merchandiser));
        }

        let merchandiser = self
            .users
            .create_merchandiser(payload.user_id, payload.zone_geographique.as_deref(), Some(manager_id))
            .await?;
        tracing::info!(merchandiser_id = merchandiser.id, user_id = payload.user_id, "Profil merchandiser créé");
        Ok(merchandiser)
    }

    async fn ensure_user_exists(&self, user_id: i32) -> Result<(), AppError> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(Entity::User)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, Repositories, RoleRepository};

    async fn seed_user(repos: &Repositories, email: &str) -> User {
        let role_id = match repos.roles.find_by_name("Terrain").await.unwrap() {
            Some(role) => role.id,
            None => repos.roles.create_role("Terrain", None).await.unwrap().id,
        };
        repos
            .users
            .create_user(&NewUser { nom: "Agent".into(), email: email.into(), password_hash: "hash".into(), role_id })
            .await
            .unwrap()
    }

    fn merchandiser_payload(user_id: i32, manager_id: Option<i32>) -> MerchandiserCreate {
        MerchandiserCreate { user_id, zone_geographique: Some("Thiès".into()), manager_id }
    }

    #[tokio::test]
    async fn merchandiser_reports_to_the_superviseur_who_created_it() {
        let repos = Repositories::in_memory();
        let chef = seed_user(&repos, "chef@exemple.com").await;
        let agent = seed_user(&repos, "agent@exemple.com").await;
        let profiles = ProfileService::new(repos.users.clone());

        let superviseur = profiles.create_superviseur(&chef, chef.id).await.unwrap();
        let merchandiser = profiles.create_merchandiser(&chef, &merchandiser_payload(agent.id, None)).await.unwrap();

        assert_eq!(merchandiser.manager_id, Some(superviseur.id));
        assert_eq!(merchandiser.user_id, agent.id);
    }

    #[tokio::test]
    async fn only_superviseurs_create_profiles_once_one_exists() {
        let repos = Repositories::in_memory();
        let chef = seed_user(&repos, "chef@exemple.com").await;
        let agent = seed_user(&repos, "agent@exemple.com").await;
        let profiles = ProfileService::new(repos.users.clone());

        // Ninguém é supervisor ainda: merchandiser não pode se autodeclarar
        assert!(matches!(
            profiles.create_merchandiser(&agent, &merchandiser_payload(agent.id, None)).await,
            Err(AppError::Forbidden(Entity::Superviseur))
        ));

        profiles.create_superviseur(&chef, chef.id).await.unwrap();

        assert!(matches!(
            profiles.create_superviseur(&agent, agent.id).await,
            Err(AppError::Forbidden(Entity::Superviseur))
        ));
        assert!(matches!(
            profiles.create_merchandiser(&agent, &merchandiser_payload(agent.id, None)).await,
            Err(AppError::Forbidden(Entity::Superviseur))
        ));
        assert!(repos.users.find_merchandiser_by_user(agent.id).await.unwrap().is_none());

        // O supervisor pode promover outro supervisor
        profiles.create_superviseur(&chef, agent.id).await.unwrap();
    }

    #[tokio::test]
    async fn a_user_has_at_most_one_profile_of_each_kind() {
        let repos = Repositories::in_memory();
        let chef = seed_user(&repos, "chef@exemple.com").await;
        let agent = seed_user(&repos, "agent@exemple.com").await;
        let profiles = ProfileService::new(repos.users.clone());
        profiles.create_superviseur(&chef, chef.id).await.unwrap();
        let payload = merchandiser_payload(agent.id, None);

        profiles.create_merchandiser(&chef, &payload).await.unwrap();
        assert!(matches!(
            profiles.create_merchandiser(&chef, &payload).await,
            Err(AppError::DuplicateEntity(Entity::Merchandiser))
        ));

        assert!(matches!(
            profiles.create_superviseur(&chef, chef.id).await,
            Err(AppError::DuplicateEntity(Entity::Superviseur))
        ));
    }

    #[tokio::test]
    async fn unknown_user_or_manager_is_not_found() {
        let repos = Repositories::in_memory();
        let chef = seed_user(&repos, "chef@exemple.com").await;
        let agent = seed_user(&repos, "agent@exemple.com").await;
        let profiles = ProfileService::new(repos.users.clone());
        profiles.create_superviseur(&chef, chef.id).await.unwrap();

        assert!(matches!(profiles.create_superviseur(&chef, 99).await, Err(AppError::NotFound(Entity::User))));
        assert!(matches!(
            profiles.create_merchandiser(&chef, &merchandiser_payload(agent.id, Some(5))).await,
            Err(AppError::NotFound(Entity::Superviseur))
        ));
    }
}
