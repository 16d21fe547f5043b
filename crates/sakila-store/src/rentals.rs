//! Renting and returning inventory copies.
//!
//! A rental is active while its `return_date` is `NULL`; an inventory copy
//! is on the shelf while no active rental references it. Both writes that
//! first look a row up and then modify it run in an immediate transaction
//! so that two concurrent requests cannot pick the same copy or rental.

use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use sakila_types::{ReturnOutcome, ReturnTarget};

use crate::convert::now_timestamp;
use crate::error::StoreError;

/// Rents the lowest-numbered available copy of a film.
///
/// Returns the id of the new rental, dated now and attributed to `staff_id`.
///
/// # Errors
///
/// Returns `StoreError::Unavailable` when every copy is rented out (or the
/// film has none), `StoreError::InvalidInput` when the customer or staff
/// member does not exist, and `StoreError::Database` on SQL failure.
pub fn rent_film(
    conn: &Connection,
    film_id: i64,
    customer_id: i64,
    staff_id: i64,
) -> Result<i64, StoreError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let inventory_id: Option<i64> = tx
        .query_row(
            "SELECT i.inventory_id
             FROM inventory i
             WHERE i.film_id = ?1
               AND NOT EXISTS (
                   SELECT 1 FROM rental r
                   WHERE r.inventory_id = i.inventory_id AND r.return_date IS NULL
               )
             ORDER BY i.inventory_id
             LIMIT 1",
            params![film_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(inventory_id) = inventory_id else {
        tracing::warn!(film_id, customer_id, "no copy available for rent");
        return Err(StoreError::Unavailable(
            "Film not available for rent".to_string(),
        ));
    };

    let now = now_timestamp();
    tx.execute(
        "INSERT INTO rental (rental_date, inventory_id, customer_id, staff_id, last_update)
         VALUES (?1, ?2, ?3, ?4, ?1)",
        params![now, inventory_id, customer_id, staff_id],
    )
    .map_err(StoreError::on_write("Invalid customer_id or staff_id"))?;
    let rental_id = tx.last_insert_rowid();

    tx.commit()?;

    tracing::info!(rental_id, film_id, inventory_id, customer_id, "film rented");
    Ok(rental_id)
}

/// Marks the rental(s) selected by `target` as returned now.
///
/// # Errors
///
/// Returns `StoreError::NotFound` when the target matches no active rental
/// and `StoreError::Database` on SQL failure. Returning every active rental
/// succeeds even when there are none.
pub fn return_film(conn: &Connection, target: ReturnTarget) -> Result<ReturnOutcome, StoreError> {
    let now = now_timestamp();

    match target {
        ReturnTarget::Rental(rental_id) => {
            let updated = conn.execute(
                "UPDATE rental SET return_date = ?1, last_update = ?1
                 WHERE rental_id = ?2 AND return_date IS NULL",
                params![now, rental_id],
            )?;
            if updated == 0 {
                return Err(StoreError::NotFound(
                    "Rental not found or already returned".to_string(),
                ));
            }
            tracing::info!(rental_id, "rental returned");
            Ok(ReturnOutcome::Single { rental_id })
        }
        ReturnTarget::AllActive => {
            let returned_count = conn.execute(
                "UPDATE rental SET return_date = ?1, last_update = ?1
                 WHERE return_date IS NULL",
                params![now],
            )?;
            tracing::info!(returned_count, "all active rentals returned");
            Ok(ReturnOutcome::Bulk { returned_count })
        }
        ReturnTarget::OldestForCustomer {
            customer_id,
            film_id,
        } => {
            let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

            let rental_id: Option<i64> = tx
                .query_row(
                    "SELECT r.rental_id
                     FROM rental r
                     JOIN inventory i ON i.inventory_id = r.inventory_id
                     WHERE r.customer_id = ?1
                       AND r.return_date IS NULL
                       AND (?2 IS NULL OR i.film_id = ?2)
                     ORDER BY r.rental_date ASC, r.rental_id ASC
                     LIMIT 1",
                    params![customer_id, film_id],
                    |row| row.get(0),
                )
                .optional()?;

            let Some(rental_id) = rental_id else {
                return Err(StoreError::NotFound(
                    "No active rental found for the provided customer/film".to_string(),
                ));
            };

            tx.execute(
                "UPDATE rental SET return_date = ?1, last_update = ?1 WHERE rental_id = ?2",
                params![now, rental_id],
            )?;
            tx.commit()?;

            tracing::info!(rental_id, customer_id, ?film_id, "oldest active rental returned");
            Ok(ReturnOutcome::Single { rental_id })
        }
    }
}
