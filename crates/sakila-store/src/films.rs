//! Film rankings and per-film inventory counts.

use rusqlite::{params, Connection, Row};
use sakila_types::{Film, FilmInventory, RankedFilm, RANKING_LIMIT};

use crate::convert::{
    decimal_column, optional_integer_column, split_features, timestamp_column,
};
use crate::error::StoreError;

/// Every film column, in the order [`film_from_row`] reads them.
pub(crate) const FILM_COLUMNS: &str = "f.film_id, f.title, f.description, f.release_year, \
     f.language_id, f.original_language_id, f.rental_duration, f.rental_rate, f.length, \
     f.replacement_cost, f.rating, f.special_features, f.last_update";

/// Maps the leading [`FILM_COLUMNS`] of a row into a [`Film`].
pub(crate) fn film_from_row(row: &Row<'_>) -> rusqlite::Result<Film> {
    let features: Option<String> = row.get(11)?;
    Ok(Film {
        film_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        release_year: optional_integer_column(row, 3)?,
        language_id: row.get(4)?,
        original_language_id: row.get(5)?,
        rental_duration: row.get(6)?,
        rental_rate: decimal_column(row, 7)?,
        length: row.get(8)?,
        replacement_cost: decimal_column(row, 9)?,
        rating: row.get(10)?,
        special_features: split_features(features.as_deref()),
        last_update: timestamp_column(row, 12)?,
    })
}

/// Returns the most rented films, most rentals first.
///
/// Films that were never rented do not appear. Ties are ordered by film id.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn top_rented_films(conn: &Connection) -> Result<Vec<RankedFilm>, StoreError> {
    let sql = format!(
        "SELECT {FILM_COLUMNS}, COUNT(r.rental_id) AS rental_count
         FROM rental r
         JOIN inventory i ON i.inventory_id = r.inventory_id
         JOIN film f ON f.film_id = i.film_id
         GROUP BY f.film_id
         ORDER BY rental_count DESC, f.film_id ASC
         LIMIT ?1"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![RANKING_LIMIT], |row| {
        Ok(RankedFilm {
            film: film_from_row(row)?,
            rental_count: row.get(13)?,
        })
    })?;

    let films = rows.collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = films.len(), "loaded top rented films");
    Ok(films)
}

/// Counts the copies of a film and how many of them are on the shelf.
///
/// A copy is available when no active rental references it. An unknown
/// film has no copies, so both counts are zero.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn film_inventory(conn: &Connection, film_id: i64) -> Result<FilmInventory, StoreError> {
    let counts = conn.query_row(
        "SELECT
            COUNT(*),
            COALESCE(SUM(NOT EXISTS (
                SELECT 1 FROM rental r
                WHERE r.inventory_id = i.inventory_id AND r.return_date IS NULL
            )), 0)
         FROM inventory i
         WHERE i.film_id = ?1",
        params![film_id],
        |row| {
            Ok(FilmInventory {
                total_inventory: row.get(0)?,
                available_inventory: row.get(1)?,
            })
        },
    )?;
    Ok(counts)
}
