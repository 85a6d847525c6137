// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    let guard = axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    // Rotas públicas: login e cargos
    let public_routes = Router::new()
        .route("/token", post(handlers::auth::login))
        .route("/roles/"
               ,post(handlers::roles::create_role)
               .get(handlers::roles::list_roles)
        )
        .route("/roles/{id}", get(handlers::roles::get_role));

    // Rotas protegidas pelo middleware de autenticação
    let protected_routes = Router::new()
        .route("/users/me/", get(handlers::auth::get_me))
        .route("/users/{id}", get(handlers::auth::get_user))
        .route("/superviseurs/", post(handlers::profiles::create_superviseur))
        .route("/merchandisers/", post(handlers::profiles::create_merchandiser))
        .route("/clients/"
               ,post(handlers::clients::create_client)
               .get(handlers::clients::list_clients)
        )
        .route("/clients/{id}", get(handlers::clients::get_client))
        .route("/produits/"
               ,post(handlers::produits::create_produit)
               .get(handlers::produits::list_produits)
        )
        .route("/produits/{id}", get(handlers::produits::get_produit))
        .route("/visites/"
               ,post(handlers::visites::create_visite)
               .get(handlers::visites::list_visites)
        )
        .route("/visites/{id}", get(handlers::visites::get_visite))
        .route_layer(guard.clone());

    // /users/ mistura as duas coisas: o cadastro é público, a listagem não
    let users_route = post(handlers::auth::create_user)
        .merge(get(handlers::auth::list_users).route_layer(guard));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/users/", users_route)
        .merge(public_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
