//! Film ranking and inventory handlers.

use crate::api::{path_id, with_conn, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use sakila_types::{FilmInventory, RankedFilm};
use std::sync::Arc;

/// Handler for `GET /top_rented_films`.
pub async fn top_rented_films_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<RankedFilm>>, ApiError> {
    let films = with_conn(state, |conn| Ok(sakila_store::top_rented_films(conn)?)).await?;
    Ok(Json(films))
}

/// Handler for `GET /film_inventory/{film_id}`.
pub async fn film_inventory_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(film_id): Path<String>,
) -> Result<Json<FilmInventory>, ApiError> {
    let film_id = path_id("film_id", &film_id)?;
    let inventory = with_conn(state, move |conn| {
        Ok(sakila_store::film_inventory(conn, film_id)?)
    })
    .await?;
    Ok(Json(inventory))
}
