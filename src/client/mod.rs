//! Docmail client module
//!
//! High-level async operations over a pluggable SOAP transport.

#[allow(clippy::module_inception)]
mod client;

pub use client::{DocmailClient, DEFAULT_CORRECTION_METHOD};

#[cfg(test)]
mod tests;
