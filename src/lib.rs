// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Docmail Client
//!
//! Async client for the Docmail postal mailing service, built around a
//! decoder for its XML result documents.
//!
//! ## Features
//!
//! - **Response Decoding**: Field labels normalized to snake_case, values
//!   coerced to booleans, timestamps or text
//! - **Fault Detection**: Embedded service errors surface as typed faults
//! - **Typed Targets**: Decode into plain records or domain types such as
//!   [`Mailing`], with per-type post-processing
//! - **Pluggable Transport**: Any [`SoapService`] can carry the calls
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docmail::{ClientConfig, DocmailClient, Mailing, Result};
//!
//! async fn run(service: impl docmail::SoapService) -> Result<()> {
//!     let config = ClientConfig::builder("acme", "s3cret").source("billing").build()?;
//!     let client = DocmailClient::new(config, service)?;
//!
//!     let mut mailing = Mailing::named("Spring campaign");
//!     let guid = client.create_mailing(&mut mailing).await?;
//!     println!("status: {}", client.get_process_status(&guid).await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      DocmailClient                        │
//! │  create_mailing  add_template_file  process_mailing  ...  │
//! └───────────────────────────────────────────────────────────┘
//!               │                               │
//! ┌─────────────┴─────────────┐   ┌─────────────┴─────────────┐
//! │       SoapService         │   │      ResponseDecoder      │
//! │  invoke(method, args)     │   │  label │ value │ fault    │
//! │  -> XML result            │   │  post-process → target    │
//! └───────────────────────────┘   └───────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document model fields before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Wire enumerations
pub mod types;

/// Response decoding (labels, values, faults)
pub mod decode;

/// Mailings, templates, mailing lists and processing options
pub mod model;

/// SOAP transport seam
pub mod soap;

/// High-level Docmail operations
pub mod client;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Fault, Result};
pub use types::*;

// Re-export commonly used types
pub use client::DocmailClient;
pub use config::{load_config, load_config_from_str, ClientConfig};
pub use decode::{normalize_label, DecodedRecord, FieldValue, ResponseDecoder, TargetKind};
pub use model::{Mailing, MailingListFile, MailingListOptions, ProcessOptions, TemplateFile};
pub use soap::{CannedService, SoapArg, SoapService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
