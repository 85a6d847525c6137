// src/config.rs

use std::{env, time::Duration};

use anyhow::{bail, Context};
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::Repositories,
    services::{
        auth::AuthService, catalog_service::CatalogService, profile_service::ProfileService,
        role_service::RoleService, token::TokenService, visite_service::VisiteService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca; facilita os testes.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET não pode ser vazio");
        }

        Ok(Self {
            database_url,
            jwt_secret,
            access_token_expire_minutes: parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválido: '{}'", key, raw)),
        None => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub role_service: RoleService,
    pub catalog_service: CatalogService,
    pub profile_service: ProfileService,
    pub visite_service: VisiteService,
}

impl AppState {
    /// Conecta no Postgres, roda as migrações e monta o estado.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        Ok(Self::with_repositories(Repositories::postgres(db_pool), config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_repositories(repos: Repositories, config: &Config) -> Self {
        let tokens = TokenService::new(
            &config.jwt_secret,
            chrono::Duration::minutes(config.access_token_expire_minutes),
        );

        Self {
            auth_service: AuthService::new(
                repos.users.clone(),
                repos.roles.clone(),
                repos.clients.clone(),
                tokens,
                config.bcrypt_cost,
            ),
            role_service: RoleService::new(repos.roles.clone()),
            catalog_service: CatalogService::new(repos.clients.clone(), repos.produits.clone()),
            profile_service: ProfileService::new(repos.users.clone()),
            visite_service: VisiteService::new(repos.visites, repos.users),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/merch"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.access_token_expire_minutes, 30);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn secret_is_required() {
        assert!(Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "  ")])).is_err());
    }

    #[test]
    fn malformed_numbers_name_the_key() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "trinta"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"));
    }
}
