// src/models/catalog.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- CLIENTES (pontos de venda visitados) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i32,
    #[schema(example = "Boutique Keur Massar")]
    pub nom_client: String,
    pub contact: Option<String>,
    #[schema(example = "Épicerie")]
    pub typologie: Option<String>,
    pub localisation: Option<String>,
    pub createur_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ClientCreate {
    #[validate(length(min = 1, max = 200, message = "Le nom du client est obligatoire."))]
    #[schema(example = "Boutique Keur Massar")]
    pub nom_client: String,

    #[validate(length(max = 100))]
    pub contact: Option<String>,

    #[validate(length(max = 100))]
    pub typologie: Option<String>,

    #[validate(length(max = 255))]
    pub localisation: Option<String>,
}

// --- PRODUTOS ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Produit {
    pub id: i32,
    #[schema(example = "Jus de bissap 1L")]
    pub nom_produit: String,
    pub marque: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProduitCreate {
    #[validate(length(min = 1, max = 200, message = "Le nom du produit est obligatoire."))]
    #[schema(example = "Jus de bissap 1L")]
    pub nom_produit: String,

    #[validate(length(max = 100))]
    pub marque: Option<String>,
}
