//! Response decoder module
//!
//! Turns the loosely-structured XML returned by Docmail into typed records.
//!
//! # Overview
//!
//! Every response is a root element with one child per field. Each field
//! node carries a human-readable label and a value as its first two child
//! elements. The decoder:
//!
//! - normalizes labels into snake_case names (`MailingGUID` -> `mailing_guid`)
//! - coerces values into booleans, timestamps or text
//! - raises a [`Fault`](crate::error::Fault) when a field named `error_code`
//!   is present
//! - runs an optional post-processing hook for richer target kinds

mod decoder;
mod label;
mod types;
mod value;

pub use decoder::{ResponseDecoder, ERROR_CODE_FIELD};
pub use label::{normalize_label, split_caps};
pub use types::{DecodedRecord, FieldValue, PostProcess, TargetKind, TIMESTAMP_DISPLAY_FORMAT};
pub use value::{coerce_value, TIMESTAMP_FORMAT};
