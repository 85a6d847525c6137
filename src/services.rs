pub mod auth;
pub mod catalog_service;
pub mod profile_service;
pub mod role_service;
pub mod token;
pub mod visite_service;
