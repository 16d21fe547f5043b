//! Sakila rental server library logic.
//!
//! Exposes the router builder [`app`] and the shared [`AppState`]. The
//! binary in `main.rs` only loads configuration, prepares the database and
//! serves the router.

pub mod api;
pub mod api_actors;
pub mod api_customers;
pub mod api_films;
pub mod api_rentals;
pub mod api_search;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use config::RentalsConfig;
use sakila_db::DbPool;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Staff attribution and bulk-return policy for rentals.
    pub rentals: RentalsConfig,
}

/// Maximum request body size (1 MiB).
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/top_rented_films", get(api_films::top_rented_films_handler))
        .route(
            "/film_inventory/{film_id}",
            get(api_films::film_inventory_handler),
        )
        .route("/top_actors", get(api_actors::top_actors_handler))
        .route(
            "/actor_films/{actor_id}",
            get(api_actors::actor_films_handler),
        )
        .route("/search", get(api_search::search_handler))
        .route("/rent_film", post(api_rentals::rent_film_handler))
        .route("/return_film", post(api_rentals::return_film_handler))
        .route("/customers", get(api_customers::list_customers_handler))
        .route(
            "/customers/search",
            get(api_customers::search_customers_handler),
        )
        .route("/customers/add", post(api_customers::add_customer_handler))
        .route(
            "/edit_customer/{customer_id}",
            put(api_customers::edit_customer_handler),
        )
        .route(
            "/delete_customer/{customer_id}",
            delete(api_customers::delete_customer_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
