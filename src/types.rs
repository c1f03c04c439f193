//! Common types used throughout the Docmail client
//!
//! Enumerations for the option values the Docmail service accepts. Each one
//! converts to and from the exact string used on the wire.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declare a wire-string enum with `as_str`, `Display`, `FromStr` and serde
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value sent to the service
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(Error::invalid_value($field, format!("unknown value '{other}'"))),
                }
            }
        }
    };
}

// ============================================================================
// Mailing Options
// ============================================================================

wire_enum! {
    /// Product a mailing is printed as
    ProductType, "product_type" {
        A4Letter => "A4Letter",
        BusinessCard => "BusinessCard",
        GreetingCard => "GreetingCard",
        Postcard => "Postcard",
    }
}

wire_enum! {
    /// Document layout of a template
    DocumentType, "document_type" {
        A4Letter => "A4Letter",
        BusinessCard => "BusinessCard",
        GreetingCardA5 => "GreetingCardA5",
        PostcardA5 => "PostcardA5",
        PostcardA6 => "PostcardA6",
        PostcardA5Right => "PostcardA5Right",
        PostcardA6Right => "PostcardA6Right",
    }
}

wire_enum! {
    /// Postal delivery class
    DeliveryType, "delivery_type" {
        First => "First",
        Standard => "Standard",
        Courier => "Courier",
    }
}

wire_enum! {
    /// How the addressee name is rendered
    AddressNameFormat, "address_name_format" {
        FullName => "Full Name",
        FirstnameSurname => "Firstname Surname",
        TitleInitialSurname => "Title Initial Surname",
        TitleSurname => "Title Surname",
        TitleFirstnameSurname => "Title Firstname Surname",
    }
}

wire_enum! {
    /// Smallest envelope the mailing may be packed into
    MinEnvelopeSize, "min_envelope_size" {
        C4 => "C4",
        C5 => "C5",
    }
}

wire_enum! {
    /// Font used for the address block
    AddressFont, "address_font_code" {
        Arial10 => "Arial10",
        Arial11 => "Arial11",
        Arial12 => "Arial12",
        Arial13 => "Arial13",
        Arial14 => "Arial14",
        Courier10 => "Courier10",
        Courier11 => "Courier11",
        Courier12 => "Courier12",
        Courier13 => "Courier13",
        Courier14 => "Courier14",
        Gotham9 => "Gotham9",
        Gotham10 => "Gotham10",
        Gotham12 => "Gotham12",
        Helvetica12 => "Helvetica12",
        Helvetica13 => "Helvetica13",
        Helvetica14 => "Helvetica14",
        MetaOT10 => "MetaOT10",
        MetaOT11 => "MetaOT11",
        MetaOT12 => "MetaOT12",
        Trebuchet10 => "Trebuchet10",
        Trebuchet11 => "Trebuchet11",
        Trebuchet12 => "Trebuchet12",
        Verdana10 => "Verdana10",
        Verdana11 => "Verdana11",
        Verdana12 => "Verdana12",
    }
}

// ============================================================================
// File Options
// ============================================================================

wire_enum! {
    /// How the service treats an uploaded template
    TemplateType, "template_type" {
        Document => "Document",
        PreformattedStream => "Preformatted Stream",
    }
}

wire_enum! {
    /// Layout of an uploaded mailing list
    MailingListFormat, "data_format" {
        Csv => "CSV",
        Excel => "Excel",
        TabSeparated => "Tab separated",
        Delimited => "Delimited",
        FixedWidth => "Fixed width",
    }
}

// ============================================================================
// Account Options
// ============================================================================

wire_enum! {
    /// Account whose balance is queried
    BalanceAccount, "account_type" {
        Topup => "Topup",
        Invoice => "Invoice",
    }
}

wire_enum! {
    /// How a processed mailing is paid for
    PaymentMethod, "payment_method" {
        Topup => "Topup",
        Invoice => "Invoice",
    }
}
