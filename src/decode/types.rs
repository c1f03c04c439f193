//! Decoded value and record types
//!
//! Defines the typed values produced by the decoder, the ordered record that
//! holds them, and the trait for kinds a record can be bound into.

use crate::error::Result;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Display format used when a timestamp has to be rendered as text
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A typed field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// `Yes` / `No` in the response
    Bool(bool),
    /// `DD/MM/YYYY HH:MM:SS` in the response
    Timestamp(NaiveDateTime),
    /// Anything else, unchanged
    Text(String),
    /// Cleared by a post-processing hook
    Null,
}

impl FieldValue {
    /// Boolean value, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Timestamp value, if this is one
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Text value, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the value was cleared
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(true) => f.write_str("True"),
            FieldValue::Bool(false) => f.write_str("False"),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_DISPLAY_FORMAT)),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Ordered mapping from canonical field name to typed value.
///
/// Keys keep the position of their first insertion; inserting an existing
/// key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DecodedRecord {
    fields: IndexMap<String, FieldValue>,
}

impl DecodedRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the value it replaced
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Clear a field to `Null`, keeping its position
    pub fn set_null(&mut self, key: &str) {
        if let Some(value) = self.fields.get_mut(key) {
            *value = FieldValue::Null;
        }
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get a text field
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Get a boolean field
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(FieldValue::as_bool)
    }

    /// Get a timestamp field
    pub fn get_timestamp(&self, key: &str) -> Option<NaiveDateTime> {
        self.get(key).and_then(FieldValue::as_timestamp)
    }

    /// Check if a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for DecodedRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Post-processing hook run on a fully decoded record
pub type PostProcess = fn(&mut DecodedRecord);

/// A kind a decoded record can be bound into.
///
/// Kinds that need cross-field adjustments declare a [`PostProcess`] hook;
/// the decoder runs it once every field has been decoded and before
/// [`TargetKind::from_record`] is called. Kinds without one leave
/// `POST_PROCESS` as `None` and receive the record untouched.
pub trait TargetKind: Sized {
    /// Optional post-processing capability
    const POST_PROCESS: Option<PostProcess> = None;

    /// Bind a decoded record into this kind
    fn from_record(record: DecodedRecord) -> Result<Self>;
}

impl TargetKind for DecodedRecord {
    fn from_record(record: DecodedRecord) -> Result<Self> {
        Ok(record)
    }
}
