//! Field value coercion
//!
//! Values arrive as text. Timestamps and yes/no flags are turned into typed
//! values; everything else is kept as-is. Numbers are left to the caller.

use super::types::FieldValue;
use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

/// Format of timestamps in Docmail responses
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Regex for values that look like `DD/MM/YYYY HH:MM:SS`
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[012])/(19|20)\d\d ([0-1][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]$",
    )
    .unwrap()
});

/// Coerce a raw text value into a typed value.
///
/// A value that matches the timestamp shape but is not a real date (for
/// example `31/02/2020 10:00:00`) fails with [`Error::Format`].
pub fn coerce_value(value: &str) -> Result<FieldValue> {
    if TIMESTAMP_REGEX.is_match(value) {
        return NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(FieldValue::Timestamp)
            .map_err(|e| Error::format(value, e.to_string()));
    }

    if value.eq_ignore_ascii_case("yes") {
        return Ok(FieldValue::Bool(true));
    }

    if value.eq_ignore_ascii_case("no") {
        return Ok(FieldValue::Bool(false));
    }

    Ok(FieldValue::Text(value.to_string()))
}
