//! Página de resultados con token de continuación.
use serde::{Deserialize, Serialize};

/// Resultado parcial de un listado paginado. `next_page_token` ausente o
/// vacío significa que no hay más páginas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self { items, next_page_token }
    }

    /// Página final sin continuación.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next_page_token: None }
    }

    /// true si el token presente es no-vacío.
    pub fn has_more(&self) -> bool {
        self.next_page_token.as_deref().map(|t| !t.is_empty()).unwrap_or(false)
    }
}
