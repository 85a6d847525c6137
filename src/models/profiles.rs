// src/models/profiles.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Superviseur {
    pub id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Merchandiser {
    pub id: i32,
    pub user_id: i32,
    pub zone_geographique: Option<String>,
    pub manager_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SuperviseurCreate {
    pub user_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MerchandiserCreate {
    pub user_id: i32,

    #[validate(length(max = 100))]
    #[schema(example = "Dakar Plateau")]
    pub zone_geographique: Option<String>,

    // Id do perfil de supervisor (não do usuário)
    pub manager_id: Option<i32>,
}
