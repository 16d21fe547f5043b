//! Conversion of stored column values into JSON-safe primitives.
//!
//! Timestamps are exchanged as `YYYY-MM-DD HH:MM:SS` text, money columns as
//! `f64`, and the comma-delimited `special_features` column as a list.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::{FromSqlError, FromSqlResult, ValueRef};
use rusqlite::Row;

/// Canonical text format of every timestamp the service reads or writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a timestamp in the canonical format.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// The current UTC time in the canonical format.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now().naive_utc())
}

/// Re-emits a stored timestamp in the canonical format.
///
/// Accepts the canonical form, the ISO-8601 `T` separator, fractional
/// seconds and RFC 3339 offsets (converted to UTC). Text that matches none
/// of these is returned unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return format_timestamp(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return format_timestamp(ts);
        }
    }

    raw.to_string()
}

/// Reads a money value stored as integer, real or numeric text.
pub fn decimal_from_sql(value: ValueRef<'_>) -> FromSqlResult<f64> {
    match value {
        ValueRef::Integer(i) => Ok(i as f64),
        ValueRef::Real(f) => Ok(f),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .ok_or(FromSqlError::InvalidType),
        ValueRef::Null | ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
    }
}

/// Reads an integer stored as integer or numeric text.
///
/// Schemas that declare a column `VARCHAR` (such as `release_year` in
/// several Sakila ports) store `'2006'` rather than `2006`.
pub fn integer_from_sql(value: ValueRef<'_>) -> FromSqlResult<i64> {
    match value {
        ValueRef::Integer(i) => Ok(i),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .ok_or(FromSqlError::InvalidType),
        ValueRef::Real(_) | ValueRef::Null | ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
    }
}

/// Splits the comma-delimited feature column. `NULL` yields an empty list.
pub fn split_features(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|feature| !feature.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Reads column `idx` as a money value.
pub(crate) fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    let value = row.get_ref(idx)?;
    decimal_from_sql(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, value.data_type(), Box::new(e))
    })
}

/// Reads column `idx` as an integer, accepting numeric text.
pub(crate) fn integer_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<i64> {
    let value = row.get_ref(idx)?;
    integer_from_sql(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, value.data_type(), Box::new(e))
    })
}

/// Like [`integer_column`], with `NULL` read as `None`.
pub(crate) fn optional_integer_column(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<i64>> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        _ => integer_column(row, idx).map(Some),
    }
}

/// Reads column `idx` as a canonical timestamp.
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    let raw: String = row.get(idx)?;
    Ok(normalize_timestamp(&raw))
}
