//! Film search by title, actor name or genre.

use rusqlite::{params, Connection};
use sakila_types::{Film, SearchKind};

use crate::error::StoreError;
use crate::films::{film_from_row, FILM_COLUMNS};

/// Finds films whose title, actor name or genre contains `query`.
///
/// Matching is a case-insensitive substring match. Actor names are matched
/// as `"FIRST LAST"`. Each film appears at most once, ordered by film id.
/// An empty query matches nothing. Any other query, whitespace included,
/// is matched as given.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn search_films(
    conn: &Connection,
    kind: SearchKind,
    query: &str,
) -> Result<Vec<Film>, StoreError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let sql = match kind {
        SearchKind::Film => format!(
            "SELECT {FILM_COLUMNS}
             FROM film f
             WHERE f.title LIKE ?1
             ORDER BY f.film_id"
        ),
        SearchKind::Actor => format!(
            "SELECT DISTINCT {FILM_COLUMNS}
             FROM film f
             JOIN film_actor fa ON fa.film_id = f.film_id
             JOIN actor a ON a.actor_id = fa.actor_id
             WHERE a.first_name || ' ' || a.last_name LIKE ?1
             ORDER BY f.film_id"
        ),
        SearchKind::Genre => format!(
            "SELECT DISTINCT {FILM_COLUMNS}
             FROM film f
             JOIN film_category fc ON fc.film_id = f.film_id
             JOIN category c ON c.category_id = fc.category_id
             WHERE c.name LIKE ?1
             ORDER BY f.film_id"
        ),
    };

    let pattern = format!("%{query}%");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern], film_from_row)?;
    let films = rows.collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(kind = kind.as_str(), query, count = films.len(), "film search");
    Ok(films)
}
