use crate::common::error::{AppError, Entity};

/// Traduz violações de constraint do Postgres para erros de domínio.
///
/// A checagem prévia nos serviços cobre o caso comum; isto cobre a corrida
/// entre a checagem e a escrita, e as chaves estrangeiras que não checamos antes.
pub(crate) fn translate_db_error(e: sqlx::Error, on_unique: Entity) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::DuplicateEntity(on_unique);
        }
        if db_err.is_foreign_key_violation() {
            let referenced = db_err
                .constraint()
                .and_then(entity_for_constraint)
                .unwrap_or(on_unique);
            return AppError::NotFound(referenced);
        }
    }
    e.into()
}

// Nomes gerados pelo Postgres: <tabela>_<coluna>_fkey
fn entity_for_constraint(constraint: &str) -> Option<Entity> {
    let column = constraint.strip_suffix("_fkey")?;
    if column.ends_with("role_id") {
        Some(Entity::Role)
    } else if column.ends_with("manager_id") {
        Some(Entity::Superviseur)
    } else if column.ends_with("merchandiser_id") {
        Some(Entity::Merchandiser)
    } else if column.ends_with("createur_id") || column.ends_with("user_id") {
        Some(Entity::User)
    } else if column.ends_with("client_id") {
        Some(Entity::Client)
    } else if column.ends_with("produit_id") {
        Some(Entity::Produit)
    } else if column.ends_with("visite_id") {
        Some(Entity::Visite)
    } else {
        None
    }
}
