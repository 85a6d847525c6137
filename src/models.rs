pub mod auth;
pub mod catalog;
pub mod profiles;
pub mod visite;
