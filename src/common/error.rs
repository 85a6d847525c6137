use std::collections::BTreeMap;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::middleware::i18n::Locale;

/// Entidades do domínio, usadas para montar mensagens localizadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Role,
    User,
    Superviseur,
    Merchandiser,
    Client,
    Produit,
    Visite,
}

impl Entity {
    fn label(self, locale: &Locale) -> &'static str {
        match (self, locale.is_english()) {
            (Entity::Role, false) => "rôle",
            (Entity::Role, true) => "role",
            (Entity::User, false) => "utilisateur",
            (Entity::User, true) => "user",
            (Entity::Superviseur, false) => "superviseur",
            (Entity::Superviseur, true) => "supervisor",
            (Entity::Merchandiser, _) => "merchandiser",
            (Entity::Client, _) => "client",
            (Entity::Produit, false) => "produit",
            (Entity::Produit, true) => "product",
            (Entity::Visite, false) => "visite",
            (Entity::Visite, true) => "visit",
        }
    }
}

// Nosso tipo de erro de domínio. Os handlers o convertem em `ApiError`
// (com o idioma do cliente) na fronteira HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur de validation")]
    ValidationError(#[from] ValidationErrors),

    #[error("Identifiants invalides")]
    InvalidCredentials,

    #[error("Jeton invalide")]
    InvalidToken,

    #[error("Accès refusé: profil {0:?} requis")]
    Forbidden(Entity),

    #[error("Entité déjà existante: {0:?}")]
    DuplicateEntity(Entity),

    #[error("Entité introuvable: {0:?}")]
    NotFound(Entity),

    #[error("Erreur de base de données: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erreur interne du serveur: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erreur de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erreur de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// O erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            // Duplicatas respondem 400, não 409 (contrato dos clientes atuais).
            AppError::DuplicateEntity(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let en = locale.is_english();
        let status = self.status();

        let (error, details) = match self {
            AppError::ValidationError(errors) => {
                let message = if en {
                    "One or more fields are invalid."
                } else {
                    "Un ou plusieurs champs sont invalides."
                };
                let details = serde_json::to_value(flatten_validation_errors(&errors))
                    .unwrap_or(Value::Null);
                (message.to_string(), Some(details))
            }
            AppError::InvalidCredentials => {
                let message = if en { "Incorrect email or password" } else { "Email ou mot de passe incorrect" };
                (message.to_string(), None)
            }
            AppError::InvalidToken => {
                let message = if en { "Could not validate credentials" } else { "Impossible de valider les identifiants" };
                (message.to_string(), None)
            }
            AppError::Forbidden(required) => {
                let label = required.label(locale);
                let message = if en {
                    format!("Only a {} may perform this action", label)
                } else {
                    format!("Seul un {} peut effectuer cette action", label)
                };
                (message, None)
            }
            AppError::DuplicateEntity(entity) => (duplicate_message(entity, locale), None),
            AppError::NotFound(entity) => {
                let label = entity.label(locale);
                let message = if en {
                    format!("Not found: {}", label)
                } else {
                    format!("Introuvable : {}", label)
                };
                (message, None)
            }
            // Todos os outros erros viram 500. O detalhe vai só para o log.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                let message = if en { "An unexpected error occurred." } else { "Une erreur inattendue s'est produite." };
                (message.to_string(), None)
            }
        };

        ApiError { status, error, details }
    }
}

fn duplicate_message(entity: Entity, locale: &Locale) -> String {
    let en = locale.is_english();
    let label = entity.label(locale);
    match entity {
        Entity::User if en => "This email is already in use".to_string(),
        Entity::User => "Cet email est déjà utilisé".to_string(),
        Entity::Role if en => "This role already exists".to_string(),
        Entity::Role => "Ce rôle existe déjà".to_string(),
        Entity::Merchandiser | Entity::Superviseur if en => {
            format!("This user already has a {} profile", label)
        }
        Entity::Merchandiser | Entity::Superviseur => {
            format!("Cet utilisateur possède déjà un profil {}", label)
        }
        _ if en => format!("This {} already exists", label),
        _ => format!("Ce {} existe déjà", label),
    }
}

/// Achata os erros (inclusive de listas aninhadas) em `caminho -> mensagens`,
/// ex.: `releves_stock[0].quantite_en_stock`.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    collect_errors(errors, "", &mut out);
    out
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(m) => m.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };

        let mut response = (self.status, Json(body)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

// Usado pelos extratores, que não conhecem o idioma do cliente.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
