//! Domain model
//!
//! Entities sent to and decoded from the Docmail service:
//! - `Mailing` - a mailing, also the target kind for mailing details
//! - `TemplateFile` / `MailingListFile` - upload payloads
//! - `ProcessOptions` - options for submitting a mailing

mod files;
mod mailing;
mod process;

pub use files::{MailingListFile, MailingListOptions, TemplateFile, DEFAULT_MAPPING_DELIMITER};
pub use mailing::{Mailing, DESPATCH_ASAP, EMPTY_GUID};
pub use process::ProcessOptions;
