//! Actor rankings.

use rusqlite::{params, Connection};
use sakila_types::{ActorFilm, ActorRanking, RANKING_LIMIT};

use crate::error::StoreError;

/// Ranks actors by how many distinct stocked films they appear in.
///
/// A film counts only if at least one inventory copy of it exists. Actors
/// with no stocked film are left out; ties are ordered by actor id.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn top_actors(conn: &Connection) -> Result<Vec<ActorRanking>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT a.actor_id,
                a.first_name || ' ' || a.last_name AS actor_name,
                COUNT(DISTINCT fa.film_id) AS film_count
         FROM actor a
         JOIN film_actor fa ON fa.actor_id = a.actor_id
         WHERE EXISTS (SELECT 1 FROM inventory i WHERE i.film_id = fa.film_id)
         GROUP BY a.actor_id
         ORDER BY film_count DESC, a.actor_id ASC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![RANKING_LIMIT], |row| {
        Ok(ActorRanking {
            actor_id: row.get(0)?,
            actor_name: row.get(1)?,
            film_count: row.get(2)?,
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Returns an actor's most rented films.
///
/// Only films with at least one rental are listed. An unknown actor yields
/// an empty list.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn actor_films(conn: &Connection, actor_id: i64) -> Result<Vec<ActorFilm>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT f.film_id, f.title, COUNT(r.rental_id) AS rental_count
         FROM rental r
         JOIN inventory i ON i.inventory_id = r.inventory_id
         JOIN film f ON f.film_id = i.film_id
         JOIN film_actor fa ON fa.film_id = f.film_id
         WHERE fa.actor_id = ?1
         GROUP BY f.film_id
         ORDER BY rental_count DESC, f.film_id ASC
         LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![actor_id, RANKING_LIMIT], |row| {
        Ok(ActorFilm {
            film_id: row.get(0)?,
            title: row.get(1)?,
            rental_count: row.get(2)?,
        })
    })?;

    let films = rows.collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(actor_id, count = films.len(), "loaded actor films");
    Ok(films)
}
