//! SOAP transport seam
//!
//! The wire protocol lives outside this crate. Callers plug in any
//! [`SoapService`] implementation; [`CannedService`] replays fixed responses
//! for tests and offline use.

mod service;

pub use service::{CannedService, SoapArg, SoapCall, SoapService};
