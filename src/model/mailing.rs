//! Mailing entity
//!
//! A mailing is both what the client sends to create or update a mailing
//! and the target kind `GetMailingDetails` responses are bound into.

use crate::decode::{DecodedRecord, FieldValue, PostProcess, TargetKind};
use crate::error::Result;
use crate::types::{AddressNameFormat, DeliveryType, MinEnvelopeSize, ProductType};
use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;
use std::str::FromStr;

/// GUID the service returns when a reference is not set
pub const EMPTY_GUID: &str = "00000000-0000-0000-0000-000000000000";

/// Despatch date value meaning "as soon as possible"
pub const DESPATCH_ASAP: &str = "ASAP";

/// Days ahead of today a new mailing is scheduled for
const DEFAULT_DESPATCH_DAYS: i64 = 2;

/// A Docmail mailing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mailing {
    /// Service-assigned identifier, set once the mailing exists remotely
    pub guid: Option<String>,
    pub product_type: ProductType,
    pub name: Option<String>,
    pub mailing_description: Option<String>,
    /// Sent to the service inverted, as `IsMono`
    pub is_colour: bool,
    pub is_duplex: bool,
    pub delivery_type: DeliveryType,
    pub courier_delivery_to_self: bool,
    pub despatch_asap: bool,
    pub despatch_date: Option<NaiveDateTime>,
    pub address_name_prefix: Option<String>,
    pub address_name_format: AddressNameFormat,
    pub discount_code: Option<String>,
    pub min_envelope_size: MinEnvelopeSize,
    /// Mailing list attached to this mailing, `None` when unset
    pub mailing_list_guid: Option<String>,
    /// Every field of the decoded response, after post-processing
    pub details: DecodedRecord,
}

impl Mailing {
    /// Create a new mailing with the service defaults
    pub fn new(name: Option<String>) -> Self {
        Self {
            guid: None,
            product_type: ProductType::A4Letter,
            name,
            mailing_description: None,
            is_colour: true,
            is_duplex: false,
            delivery_type: DeliveryType::Standard,
            courier_delivery_to_self: false,
            despatch_asap: true,
            despatch_date: Some(Local::now().naive_local() + Duration::days(DEFAULT_DESPATCH_DAYS)),
            address_name_prefix: None,
            address_name_format: AddressNameFormat::FullName,
            discount_code: None,
            min_envelope_size: MinEnvelopeSize::C5,
            mailing_list_guid: None,
            details: DecodedRecord::new(),
        }
    }

    /// Create a named mailing with the service defaults
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()))
    }

    /// Monochrome flag as the service expects it
    pub fn is_mono(&self) -> bool {
        !self.is_colour
    }
}

impl Default for Mailing {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Clear the unset list GUID and derive `despatch_asap` from the despatch date
fn format_mailing(record: &mut DecodedRecord) {
    if record.get_text("mailing_list_guid") == Some(EMPTY_GUID) {
        record.set_null("mailing_list_guid");
    }

    let Some(despatch) = record.get("despatch_date") else {
        return;
    };

    if despatch.as_text() == Some(DESPATCH_ASAP) {
        record.insert("despatch_asap", true);
        record.set_null("despatch_date");
    } else {
        record.insert("despatch_asap", false);
    }
}

impl TargetKind for Mailing {
    const POST_PROCESS: Option<PostProcess> = Some(format_mailing);

    /// Overlay the known keys onto a new mailing.
    ///
    /// A value that does not fit its typed field leaves the default in
    /// place; the raw value stays available in `details`.
    fn from_record(record: DecodedRecord) -> Result<Self> {
        let mut mailing = Mailing::new(None);

        if let Some(guid) = text(&record, "mailing_guid") {
            mailing.guid = Some(guid);
        }
        if let Some(name) = text(&record, "mailing_name").or_else(|| text(&record, "name")) {
            mailing.name = Some(name);
        }
        if let Some(product_type) = parsed(&record, "product_type") {
            mailing.product_type = product_type;
        }
        mailing.mailing_description = text(&record, "mailing_description");
        if let Some(is_colour) = flag(&record, "is_colour") {
            mailing.is_colour = is_colour;
        } else if let Some(is_mono) = flag(&record, "is_mono") {
            mailing.is_colour = !is_mono;
        }
        if let Some(is_duplex) = flag(&record, "is_duplex") {
            mailing.is_duplex = is_duplex;
        }
        if let Some(delivery_type) = parsed(&record, "delivery_type") {
            mailing.delivery_type = delivery_type;
        }
        if let Some(to_self) = flag(&record, "courier_delivery_to_self") {
            mailing.courier_delivery_to_self = to_self;
        }
        if let Some(asap) = flag(&record, "despatch_asap") {
            mailing.despatch_asap = asap;
        }
        mailing.despatch_date = timestamp(&record, "despatch_date");
        mailing.address_name_prefix = text(&record, "address_name_prefix");
        if let Some(format) = parsed(&record, "address_name_format") {
            mailing.address_name_format = format;
        }
        mailing.discount_code = text(&record, "discount_code");
        if let Some(size) = parsed(&record, "min_envelope_size") {
            mailing.min_envelope_size = size;
        }
        mailing.mailing_list_guid = text(&record, "mailing_list_guid");

        mailing.details = record;
        Ok(mailing)
    }
}

// ============================================================================
// Field Readers
// ============================================================================

/// Read a field as text; `Null` and absent fields are `None`
fn text(record: &DecodedRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        FieldValue::Null => None,
        value => Some(value.to_string()),
    }
}

/// Read a yes/no field
fn flag(record: &DecodedRecord, key: &str) -> Option<bool> {
    record.get_bool(key)
}

/// Read a timestamp field
fn timestamp(record: &DecodedRecord, key: &str) -> Option<NaiveDateTime> {
    record.get_timestamp(key)
}

/// Read a field holding one of the wire enum values
fn parsed<T: FromStr>(record: &DecodedRecord, key: &str) -> Option<T> {
    record.get_text(key).and_then(|value| value.parse().ok())
}
