//! Data access for the Sakila rental service.
//!
//! Every function takes a borrowed [`rusqlite::Connection`] and maps rows
//! into the typed records of `sakila-types`. Functions never hold on to the
//! connection, so callers are free to check one out of the pool per request
//! and release it right after.
//!
//! Multi-statement writes (renting a copy, returning the oldest rental,
//! deleting a customer) run inside a single transaction that is committed
//! only after every statement succeeded. Dropping the transaction on an
//! early `?` rolls the partial work back.

pub mod actors;
pub mod convert;
pub mod customers;
pub mod error;
pub mod films;
pub mod rentals;
pub mod search;

pub use actors::{actor_films, top_actors};
pub use customers::{
    add_customer, delete_customer, edit_customer, list_customers, search_customers,
    DeletedCustomer,
};
pub use error::StoreError;
pub use films::{film_inventory, top_rented_films};
pub use rentals::{rent_film, return_film};
pub use search::search_films;
