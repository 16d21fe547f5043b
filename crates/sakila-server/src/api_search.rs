//! Film search handler.

use crate::api::{with_conn, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Query};
use sakila_types::{Film, SearchKind};
use serde::Deserialize;
use std::sync::Arc;

/// Query string of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub query: Option<String>,
}

/// Handler for `GET /search?type=&query=`.
///
/// An unknown or missing `type`, or a missing `query`, yields `[]`.
pub async fn search_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let (Some(kind), Some(query)) = (params.kind, params.query) else {
        return Ok(Json(Vec::new()));
    };
    let Ok(kind) = kind.parse::<SearchKind>() else {
        tracing::debug!(kind = %kind, "unknown search type");
        return Ok(Json(Vec::new()));
    };

    let films = with_conn(state, move |conn| {
        Ok(sakila_store::search_films(conn, kind, &query)?)
    })
    .await?;
    Ok(Json(films))
}
