//! Shared record types for the Sakila rental service.
//!
//! Every query result shape has an explicit record here; nothing is mapped
//! dynamically from column names. Records serialize to the exact JSON field
//! names the HTTP API exposes.
//!
//! This crate also owns the request discriminators ([`SearchKind`],
//! [`CustomerSearchKind`]) and the normalization of loosely typed request
//! identifiers ([`LooseId`], [`ReturnTarget`]), so the server and the store
//! agree on one interpretation without depending on each other.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

mod request;
pub use request::{InputError, LooseId, ReturnTarget};

/// Maximum number of rows returned by the ranking queries.
pub const RANKING_LIMIT: i64 = 5;

/// A film row with every catalog column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub film_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i64>,
    pub language_id: i64,
    pub original_language_id: Option<i64>,
    pub rental_duration: i64,
    pub rental_rate: f64,
    pub length: Option<i64>,
    pub replacement_cost: f64,
    pub rating: Option<String>,
    /// Feature tags, split from the comma-delimited column.
    pub special_features: Vec<String>,
    /// Last modification time (`YYYY-MM-DD HH:MM:SS`).
    pub last_update: String,
}

/// A film together with how many times it was rented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFilm {
    #[serde(flatten)]
    pub film: Film,
    pub rental_count: i64,
}

/// Copy counts for a single film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmInventory {
    /// Number of inventory copies of the film.
    pub total_inventory: i64,
    /// Copies not referenced by any active rental.
    pub available_inventory: i64,
}

/// An actor ranked by the number of stocked films they appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRanking {
    pub actor_id: i64,
    /// First and last name joined by a single space.
    pub actor_name: String,
    pub film_count: i64,
}

/// One of an actor's films with its rental count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorFilm {
    pub film_id: i64,
    pub title: String,
    pub rental_count: i64,
}

/// A customer as returned by the customer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub store_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// `1` for active customers, `0` otherwise.
    pub active: i64,
    pub create_date: String,
}

/// The reduced customer shape returned by customer search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// A freshly created customer, echoed back after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub customer_id: i64,
    pub store_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub address_id: i64,
}

/// Validated fields for inserting a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub store_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address_id: i64,
}

/// Validated fields for updating a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub store_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
}

/// Outcome of a return request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// A single rental was closed.
    Single { rental_id: i64 },
    /// Every active rental was closed.
    Bulk { returned_count: usize },
}

/// Strategy selected by the `type` parameter of film search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Substring match on the film title.
    Film,
    /// Substring match on the full name of any actor in the film.
    Actor,
    /// Substring match on the name of any category of the film.
    Genre,
}

impl SearchKind {
    /// Returns the wire name of this search kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Film => "film",
            Self::Actor => "actor",
            Self::Genre => "genre",
        }
    }
}

impl FromStr for SearchKind {
    type Err = ParseSearchKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "film" => Ok(Self::Film),
            "actor" => Ok(Self::Actor),
            "genre" => Ok(Self::Genre),
            _ => Err(ParseSearchKindError(s.to_string())),
        }
    }
}

/// Strategy selected by the `type` parameter of customer search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSearchKind {
    /// Exact match on the customer id.
    CustomerId,
    /// Substring match on the first name.
    FirstName,
    /// Substring match on the last name.
    LastName,
}

impl CustomerSearchKind {
    /// Returns the wire name of this search kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomerId => "customer_id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
        }
    }
}

impl FromStr for CustomerSearchKind {
    type Err = ParseSearchKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer_id" => Ok(Self::CustomerId),
            "first_name" => Ok(Self::FirstName),
            "last_name" => Ok(Self::LastName),
            _ => Err(ParseSearchKindError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown search discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSearchKindError(pub String);

impl std::fmt::Display for ParseSearchKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown search type: {}", self.0)
    }
}

impl std::error::Error for ParseSearchKindError {}
