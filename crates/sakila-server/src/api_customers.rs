//! Customer handlers.

use crate::api::{path_id, with_conn, ApiError};
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Extension, Json, Path, Query};
use sakila_store::StoreError;
use sakila_types::{
    Customer, CustomerDraft, CustomerSearchKind, CustomerSummary, CustomerUpdate, LooseId,
    NewCustomer,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MISSING_FIELDS: &str = "Missing required fields";

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query string of `GET /customers/search`.
#[derive(Debug, Deserialize)]
pub struct CustomerSearchParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub query: Option<String>,
}

/// Request body for `POST /customers/add`.
#[derive(Debug, Deserialize)]
pub struct AddCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub store_id: Option<LooseId>,
    pub address_id: Option<LooseId>,
}

/// Request body for `PUT /edit_customer/{customer_id}`.
#[derive(Debug, Deserialize)]
pub struct EditCustomerRequest {
    pub store_id: Option<LooseId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub active: Option<ActiveFlag>,
}

/// The `active` flag, sent as a boolean, an integer or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ActiveFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl ActiveFlag {
    fn to_bool(&self) -> Result<bool, ApiError> {
        match self {
            ActiveFlag::Bool(b) => Ok(*b),
            ActiveFlag::Number(n) => Ok(*n != 0),
            ActiveFlag::Text(s) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => other
                    .parse::<i64>()
                    .map(|n| n != 0)
                    .map_err(|_| ApiError::BadRequest(format!("Invalid active: {s}"))),
            },
        }
    }
}

/// Returns the trimmed text of a required string field.
fn required_text(value: Option<String>) -> Result<String, ApiError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_string()))
}

/// Returns a required identifier that is neither blank nor zero.
fn required_id(value: Option<LooseId>, field: &'static str) -> Result<i64, ApiError> {
    let id = value
        .filter(LooseId::is_provided)
        .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_string()))?;
    Ok(id.to_i64(field)?)
}

/// Handler for `GET /customers`.
pub async fn list_customers_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = with_conn(state, |conn| Ok(sakila_store::list_customers(conn)?)).await?;
    Ok(Json(customers))
}

/// Handler for `GET /customers/search?type=&query=`.
///
/// Missing parameters or an unknown `type` yield `[]`.
pub async fn search_customers_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<CustomerSearchParams>,
) -> Result<Json<Vec<CustomerSummary>>, ApiError> {
    let (Some(kind), Some(query)) = (params.kind, params.query) else {
        return Ok(Json(Vec::new()));
    };
    let Ok(kind) = kind.parse::<CustomerSearchKind>() else {
        tracing::debug!(kind = %kind, "unknown customer search type");
        return Ok(Json(Vec::new()));
    };

    let customers = with_conn(state, move |conn| {
        Ok(sakila_store::search_customers(conn, kind, &query)?)
    })
    .await?;
    Ok(Json(customers))
}

/// Handler for `POST /customers/add`.
pub async fn add_customer_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AddCustomerRequest>, JsonRejection>,
) -> Result<Json<NewCustomer>, ApiError> {
    let Json(payload) = payload?;

    let draft = CustomerDraft {
        first_name: required_text(payload.first_name)?,
        last_name: required_text(payload.last_name)?,
        email: required_text(payload.email)?,
        store_id: required_id(payload.store_id, "store_id")?,
        address_id: required_id(payload.address_id, "address_id")?,
    };

    let customer = with_conn(state, move |conn| {
        Ok(sakila_store::add_customer(conn, &draft)?)
    })
    .await?;
    Ok(Json(customer))
}

/// Handler for `PUT /edit_customer/{customer_id}`.
pub async fn edit_customer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(customer_id): Path<String>,
    payload: Result<Json<EditCustomerRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let customer_id = path_id("customer_id", &customer_id)?;
    let Json(payload) = payload?;

    let active = payload
        .active
        .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_string()))?
        .to_bool()?;
    let update = CustomerUpdate {
        store_id: required_id(payload.store_id, "store_id")?,
        first_name: required_text(payload.first_name)?,
        last_name: required_text(payload.last_name)?,
        email: required_text(payload.email)?,
        active,
    };

    with_conn(state, move |conn| {
        Ok(sakila_store::edit_customer(conn, customer_id, &update)?)
    })
    .await?;

    Ok(Json(MessageResponse {
        message: "Customer updated successfully".to_string(),
    }))
}

/// Handler for `DELETE /delete_customer/{customer_id}`.
///
/// Payments, rentals and the customer row go in one transaction. A database
/// failure rolls all of it back and answers 500.
pub async fn delete_customer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(customer_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let customer_id = path_id("customer_id", &customer_id)?;

    with_conn(state, move |conn| {
        sakila_store::delete_customer(conn, customer_id).map_err(|err| match err {
            StoreError::Database(e) => {
                tracing::error!(customer_id, error = %e, "customer deletion rolled back");
                ApiError::InternalServerError(format!("Error deleting customer: {e}"))
            }
            other => other.into(),
        })
    })
    .await?;

    Ok(Json(MessageResponse {
        message: "Customer deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_flag_accepts_bool_int_and_numeric_text() {
        let cases = [
            ("true", true),
            ("false", false),
            ("1", true),
            ("0", false),
            ("\"1\"", true),
            ("\" 0 \"", false),
        ];
        for (json, expected) in cases {
            let flag: ActiveFlag = serde_json::from_str(json).expect("should deserialize");
            assert_eq!(flag.to_bool().ok(), Some(expected), "input {json}");
        }
    }

    #[test]
    fn active_flag_rejects_other_text() {
        let flag = ActiveFlag::Text("yes".to_string());
        assert!(matches!(flag.to_bool(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn required_fields_reject_blank_and_zero() {
        assert!(required_text(Some("  ".to_string())).is_err());
        assert!(required_text(None).is_err());
        assert_eq!(required_text(Some(" MARY ".to_string())).ok(), Some("MARY".to_string()));

        assert!(required_id(Some(LooseId::Number(0)), "store_id").is_err());
        assert!(required_id(Some(LooseId::Text("".to_string())), "store_id").is_err());
        assert_eq!(
            required_id(Some(LooseId::Text("2".to_string())), "store_id").ok(),
            Some(2)
        );
    }
}
