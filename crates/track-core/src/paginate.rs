//! Paginador genérico por token de continuación.
//!
//! Acumula páginas secuencialmente hasta agotar el token o alcanzar
//! `max_results`. Nunca pide una página de tamaño <= 0: con `max_results`
//! en 0 retorna vacío sin invocar el fetch. El número de fetches queda
//! acotado por ceil(max_results / page_size) cuando las páginas vienen
//! llenas.
use track_domain::PagedList;

/// `fetch(n, token)` debe devolver a lo sumo `n` elementos y el token de la
/// página siguiente (ausente o vacío si no hay más).
pub fn paginate<T, E, F>(mut fetch: F, page_size: usize, max_results: usize) -> Result<Vec<T>, E>
    where F: FnMut(usize, Option<&str>) -> Result<PagedList<T>, E>
{
    let mut results: Vec<T> = Vec::new();
    let mut token: Option<String> = None;
    while results.len() < max_results {
        let remaining = max_results - results.len();
        let n = page_size.min(remaining);
        let page = fetch(n, token.as_deref())?;
        let has_more = page.has_more();
        results.extend(page.items);
        if !has_more {
            break;
        }
        token = page.next_page_token;
    }
    Ok(results)
}
