use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

/// Parâmetros `?skip=&limit=` das listagens. Nenhuma listagem é ilimitada.
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    #[serde(default)]
    #[validate(range(min = 0, message = "skip ne peut pas être négatif"))]
    pub skip: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "limit doit être au moins 1"))]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: DEFAULT_LIMIT }
    }
}

impl Pagination {
    #[cfg(test)]
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    /// Limite efetivo enviado ao banco.
    pub fn bounded_limit(&self) -> i64 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.skip.max(0)
    }

    /// Aplica a mesma janela sobre uma coleção já ordenada (usado pelo armazenamento em memória).
    #[cfg(test)]
    pub fn window<T: Clone>(&self, rows: &[T]) -> Vec<T> {
        rows.iter()
            .skip(self.offset() as usize)
            .take(self.bounded_limit() as usize)
            .cloned()
            .collect()
    }
}
