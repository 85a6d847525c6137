// src/services/token.rs

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Claims};

/// Emite e verifica os tokens de acesso (JWT HS256) cujo `sub` é o e-mail do usuário.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<[u8]>,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self { secret: Arc::from(secret.as_bytes()), lifetime }
    }

    pub fn issue_access_token(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, self.lifetime)
    }

    pub fn issue(&self, subject: &str, lifetime: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(&self.secret))?)
    }

    /// Assinatura inválida, payload ilegível e token expirado dão todos `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map_err(|e| {
                tracing::debug!("Token rejeitado: {:?}", e.kind());
                AppError::InvalidToken
            })?;

        Ok(token_data.claims.sub)
    }
}
