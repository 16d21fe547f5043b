//! Customer listing, search and maintenance.

use rusqlite::{params, Connection, Row};
use sakila_types::{
    Customer, CustomerDraft, CustomerSearchKind, CustomerSummary, CustomerUpdate, NewCustomer,
};

use crate::convert::{integer_column, now_timestamp, timestamp_column};
use crate::error::StoreError;

/// Row counts removed by [`delete_customer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletedCustomer {
    pub payments: usize,
    pub rentals: usize,
    pub customers: usize,
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<CustomerSummary> {
    Ok(CustomerSummary {
        customer_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}

/// Lists every customer ordered by id.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn list_customers(conn: &Connection) -> Result<Vec<Customer>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT customer_id, store_id, first_name, last_name, email, active, create_date
         FROM customer
         ORDER BY customer_id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Customer {
            customer_id: row.get(0)?,
            store_id: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            email: row.get(4)?,
            active: integer_column(row, 5)?,
            create_date: timestamp_column(row, 6)?,
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Finds customers by exact id or by a substring of their first or last name.
///
/// An empty query, or an id query that is not an integer, matches nothing.
/// Name queries are matched as given, surrounding spaces included.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn search_customers(
    conn: &Connection,
    kind: CustomerSearchKind,
    query: &str,
) -> Result<Vec<CustomerSummary>, StoreError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let customers = match kind {
        CustomerSearchKind::CustomerId => {
            let Ok(customer_id) = query.trim().parse::<i64>() else {
                return Ok(Vec::new());
            };
            let mut stmt = conn.prepare(
                "SELECT customer_id, first_name, last_name, email
                 FROM customer
                 WHERE customer_id = ?1",
            )?;
            let rows = stmt.query_map(params![customer_id], summary_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
        CustomerSearchKind::FirstName | CustomerSearchKind::LastName => {
            let column = match kind {
                CustomerSearchKind::FirstName => "first_name",
                _ => "last_name",
            };
            let mut stmt = conn.prepare(&format!(
                "SELECT customer_id, first_name, last_name, email
                 FROM customer
                 WHERE {column} LIKE ?1
                 ORDER BY customer_id"
            ))?;
            let rows = stmt.query_map(params![format!("%{query}%")], summary_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
    };

    tracing::debug!(kind = kind.as_str(), query, count = customers.len(), "customer search");
    Ok(customers)
}

/// Inserts an active customer created now and returns the stored record.
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` when the store or address does not
/// exist and `StoreError::Database` on other SQL failures.
pub fn add_customer(conn: &Connection, draft: &CustomerDraft) -> Result<NewCustomer, StoreError> {
    let now = now_timestamp();
    conn.execute(
        "INSERT INTO customer
            (store_id, first_name, last_name, email, address_id, active, create_date, last_update)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
        params![
            draft.store_id,
            draft.first_name,
            draft.last_name,
            draft.email,
            draft.address_id,
            now,
        ],
    )
    .map_err(StoreError::on_write("Invalid store_id or address_id"))?;
    let customer_id = conn.last_insert_rowid();

    let customer = conn.query_row(
        "SELECT customer_id, store_id, first_name, last_name, email, address_id
         FROM customer
         WHERE customer_id = ?1",
        params![customer_id],
        |row| {
            Ok(NewCustomer {
                customer_id: row.get(0)?,
                store_id: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                email: row.get(4)?,
                address_id: row.get(5)?,
            })
        },
    )?;

    tracing::info!(customer_id, store_id = draft.store_id, "customer added");
    Ok(customer)
}

/// Overwrites a customer's store, name, email and active flag.
///
/// # Errors
///
/// Returns `StoreError::NotFound` when no customer has `customer_id`,
/// `StoreError::InvalidInput` when the store does not exist and
/// `StoreError::Database` on other SQL failures.
pub fn edit_customer(
    conn: &Connection,
    customer_id: i64,
    update: &CustomerUpdate,
) -> Result<(), StoreError> {
    let updated = conn
        .execute(
            "UPDATE customer
             SET store_id = ?1, first_name = ?2, last_name = ?3, email = ?4, active = ?5,
                 last_update = ?6
             WHERE customer_id = ?7",
            params![
                update.store_id,
                update.first_name,
                update.last_name,
                update.email,
                update.active,
                now_timestamp(),
                customer_id,
            ],
        )
        .map_err(StoreError::on_write("Invalid store_id"))?;

    if updated == 0 {
        return Err(StoreError::NotFound("Customer not found".to_string()));
    }

    tracing::info!(customer_id, active = update.active, "customer updated");
    Ok(())
}

/// Deletes a customer together with their payments and rentals.
///
/// The three deletes share one transaction: either all rows go or none do.
/// Deleting an unknown customer removes nothing and succeeds.
///
/// # Errors
///
/// Returns `StoreError::Database` if any statement fails; nothing is
/// deleted in that case.
pub fn delete_customer(conn: &Connection, customer_id: i64) -> Result<DeletedCustomer, StoreError> {
    let tx = conn.unchecked_transaction()?;

    let payments = tx.execute(
        "DELETE FROM payment WHERE customer_id = ?1",
        params![customer_id],
    )?;
    let rentals = tx.execute(
        "DELETE FROM rental WHERE customer_id = ?1",
        params![customer_id],
    )?;
    let customers = tx.execute(
        "DELETE FROM customer WHERE customer_id = ?1",
        params![customer_id],
    )?;

    tx.commit()?;

    let deleted = DeletedCustomer {
        payments,
        rentals,
        customers,
    };
    tracing::info!(customer_id, ?deleted, "customer deleted");
    Ok(deleted)
}
