//! Rent and return handlers.

use crate::api::{with_conn, ApiError};
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Extension, Json};
use sakila_types::{LooseId, ReturnOutcome, ReturnTarget};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for `POST /rent_film`.
#[derive(Debug, Deserialize)]
pub struct RentRequest {
    pub film_id: Option<LooseId>,
    pub customer_id: Option<LooseId>,
}

/// Response body for a successful rent.
#[derive(Debug, Serialize, Deserialize)]
pub struct RentResponse {
    pub message: String,
    pub rental_id: i64,
}

/// Request body for `POST /return_film`.
#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    pub rental_id: Option<LooseId>,
    pub customer_id: Option<LooseId>,
    pub film_id: Option<LooseId>,
}

/// Response body for a successful return.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnResponse {
    Single { message: String, rental_id: i64 },
    Bulk { message: String, returned_count: usize },
}

impl From<ReturnOutcome> for ReturnResponse {
    fn from(outcome: ReturnOutcome) -> Self {
        match outcome {
            ReturnOutcome::Single { rental_id } => ReturnResponse::Single {
                message: "Film returned successfully".to_string(),
                rental_id,
            },
            ReturnOutcome::Bulk { returned_count } => ReturnResponse::Bulk {
                message: "All films returned successfully".to_string(),
                returned_count,
            },
        }
    }
}

/// Handler for `POST /rent_film`.
pub async fn rent_film_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<RentRequest>, JsonRejection>,
) -> Result<Json<RentResponse>, ApiError> {
    let Json(payload) = payload?;

    let (Some(film_id), Some(customer_id)) = (
        payload.film_id.filter(LooseId::is_provided),
        payload.customer_id.filter(LooseId::is_provided),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing film_id or customer_id".to_string(),
        ));
    };
    let film_id = film_id.to_i64("film_id")?;
    let customer_id = customer_id.to_i64("customer_id")?;
    let staff_id = state.rentals.staff_id;

    let rental_id = with_conn(state, move |conn| {
        Ok(sakila_store::rent_film(conn, film_id, customer_id, staff_id)?)
    })
    .await?;

    Ok(Json(RentResponse {
        message: "Film rented successfully".to_string(),
        rental_id,
    }))
}

/// Handler for `POST /return_film`.
///
/// A non-zero `rental_id` returns that rental. Otherwise `customer_id`
/// selects the customer's oldest active rental, narrowed by `film_id` when
/// given, and `customer_id = 0` returns every active rental.
pub async fn return_film_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ReturnRequest>, JsonRejection>,
) -> Result<Json<ReturnResponse>, ApiError> {
    let Json(payload) = payload?;

    let target = ReturnTarget::resolve(
        payload.rental_id.as_ref(),
        payload.customer_id.as_ref(),
        payload.film_id.as_ref(),
    )?;

    if target == ReturnTarget::AllActive && !state.rentals.allow_bulk_return {
        tracing::warn!("bulk return requested while disabled");
        return Err(ApiError::BadRequest("Bulk return is disabled".to_string()));
    }

    let outcome = with_conn(state, move |conn| {
        Ok(sakila_store::return_film(conn, target)?)
    })
    .await?;

    Ok(Json(outcome.into()))
}
