// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "API Source du Pays"),
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::create_user,
        handlers::auth::get_me,
        handlers::auth::list_users,
        handlers::auth::get_user,

        // --- Roles ---
        handlers::roles::create_role,
        handlers::roles::list_roles,
        handlers::roles::get_role,

        // --- Profiles ---
        handlers::profiles::create_superviseur,
        handlers::profiles::create_merchandiser,

        // --- Clients & Produits ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::produits::create_produit,
        handlers::produits::list_produits,
        handlers::produits::get_produit,

        // --- Visites ---
        handlers::visites::create_visite,
        handlers::visites::list_visites,
        handlers::visites::get_visite,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::RoleCreate,
            models::auth::User,
            models::auth::UserProfile,
            models::auth::UserCreate,
            models::auth::LoginForm,
            models::auth::TokenResponse,

            // --- Profiles ---
            models::profiles::Superviseur,
            models::profiles::Merchandiser,
            models::profiles::SuperviseurCreate,
            models::profiles::MerchandiserCreate,

            // --- Catalog ---
            models::catalog::Client,
            models::catalog::ClientCreate,
            models::catalog::Produit,
            models::catalog::ProduitCreate,

            // --- Visites ---
            models::visite::Visite,
            models::visite::VisiteDetail,
            models::visite::VisiteCreate,
            models::visite::ReleveStock,
            models::visite::ReleveStockCreate,
            models::visite::LigneCommande,
            models::visite::LigneCommandeCreate,
        )
    ),
    tags(
        (name = "Authentification", description = "Emissão de tokens de acesso"),
        (name = "Utilisateurs", description = "Cadastro e perfil dos usuários"),
        (name = "Rôles", description = "Cargos"),
        (name = "Profils", description = "Perfis de campo (supervisor / merchandiser)"),
        (name = "Clients", description = "Pontos de venda"),
        (name = "Produits", description = "Catálogo de produtos"),
        (name = "Visites", description = "Visitas de campo com relevés de estoque e pedidos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
