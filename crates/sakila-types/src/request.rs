//! Normalization of loosely typed request identifiers.
//!
//! Clients send identifiers either as JSON numbers or as strings, sometimes
//! padded with whitespace, and use `0` or `""` to mean "not provided".
//! [`LooseId`] captures that input as-is and [`ReturnTarget::resolve`] turns
//! the three optional identifiers of a return request into one decision.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while interpreting request identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Neither a rental nor a customer was identified.
    #[error("Missing rental_id or customer_id")]
    MissingIdentifier,

    /// An identifier was present but is not an integer.
    #[error("Invalid {field}: {value}")]
    InvalidId {
        /// Name of the offending request field.
        field: &'static str,
        /// The raw value as received.
        value: String,
    },
}

/// An identifier sent either as a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
    Number(i64),
    Text(String),
}

impl LooseId {
    /// Returns the identifier as trimmed text.
    pub fn text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    /// Whether the identifier is an empty or whitespace-only string.
    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }

    /// Whether the identifier is the literal zero.
    pub fn is_zero(&self) -> bool {
        self.text() == "0"
    }

    /// Whether the identifier counts as provided (neither blank nor zero).
    pub fn is_provided(&self) -> bool {
        !self.is_blank() && !self.is_zero()
    }

    /// Parses the identifier as an integer, naming `field` on failure.
    pub fn to_i64(&self, field: &'static str) -> Result<i64, InputError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse().map_err(|_| InputError::InvalidId {
                field,
                value: s.clone(),
            }),
        }
    }
}

/// Which rentals a return request closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTarget {
    /// One specific rental.
    Rental(i64),
    /// Every active rental in the store.
    AllActive,
    /// The customer's oldest active rental, optionally of one film.
    OldestForCustomer {
        customer_id: i64,
        film_id: Option<i64>,
    },
}

impl ReturnTarget {
    /// Resolves the optional identifiers of a return request.
    ///
    /// A provided rental id wins. Otherwise a customer id is required; the
    /// customer id `0` selects every active rental. The film id only narrows
    /// the per-customer lookup and is ignored when blank or zero.
    pub fn resolve(
        rental_id: Option<&LooseId>,
        customer_id: Option<&LooseId>,
        film_id: Option<&LooseId>,
    ) -> Result<Self, InputError> {
        if let Some(rental_id) = rental_id.filter(|id| id.is_provided()) {
            return Ok(Self::Rental(rental_id.to_i64("rental_id")?));
        }

        let customer_id = match customer_id {
            Some(id) if !id.is_blank() => id,
            _ => return Err(InputError::MissingIdentifier),
        };

        if customer_id.is_zero() {
            return Ok(Self::AllActive);
        }

        let film_id = film_id
            .filter(|id| id.is_provided())
            .map(|id| id.to_i64("film_id"))
            .transpose()?;

        Ok(Self::OldestForCustomer {
            customer_id: customer_id.to_i64("customer_id")?,
            film_id,
        })
    }
}
