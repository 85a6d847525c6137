pub mod auth;
pub mod clients;
pub mod produits;
pub mod profiles;
pub mod roles;
pub mod visites;
