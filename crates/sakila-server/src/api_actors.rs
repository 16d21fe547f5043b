//! Actor ranking handlers.

use crate::api::{path_id, with_conn, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use sakila_types::{ActorFilm, ActorRanking};
use std::sync::Arc;

/// Handler for `GET /top_actors`.
pub async fn top_actors_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<ActorRanking>>, ApiError> {
    let actors = with_conn(state, |conn| Ok(sakila_store::top_actors(conn)?)).await?;
    Ok(Json(actors))
}

/// Handler for `GET /actor_films/{actor_id}`.
pub async fn actor_films_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(actor_id): Path<String>,
) -> Result<Json<Vec<ActorFilm>>, ApiError> {
    let actor_id = path_id("actor_id", &actor_id)?;
    let films = with_conn(state, move |conn| {
        Ok(sakila_store::actor_films(conn, actor_id)?)
    })
    .await?;
    Ok(Json(films))
}
