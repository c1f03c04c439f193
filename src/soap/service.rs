//! SOAP service trait and argument types
//!
//! The client does not speak SOAP itself. It hands a method name and an
//! ordered argument list to a [`SoapService`] and gets raw XML back.

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Mutex;

/// A primitive argument passed to a remote method
#[derive(Debug, Clone, PartialEq)]
pub enum SoapArg {
    /// String argument
    Text(String),
    /// Boolean argument
    Bool(bool),
    /// Integer argument
    Int(i64),
    /// Floating point argument
    Float(f64),
    /// Date/time argument
    DateTime(NaiveDateTime),
    /// Absent optional argument
    Null,
}

impl SoapArg {
    /// Text value, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SoapArg::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SoapArg::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for SoapArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoapArg::Text(s) => f.write_str(s),
            SoapArg::Bool(b) => write!(f, "{b}"),
            SoapArg::Int(n) => write!(f, "{n}"),
            SoapArg::Float(n) => write!(f, "{n}"),
            SoapArg::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            SoapArg::Null => Ok(()),
        }
    }
}

impl From<&str> for SoapArg {
    fn from(value: &str) -> Self {
        SoapArg::Text(value.to_string())
    }
}

impl From<String> for SoapArg {
    fn from(value: String) -> Self {
        SoapArg::Text(value)
    }
}

impl From<&String> for SoapArg {
    fn from(value: &String) -> Self {
        SoapArg::Text(value.clone())
    }
}

impl From<bool> for SoapArg {
    fn from(value: bool) -> Self {
        SoapArg::Bool(value)
    }
}

impl From<i64> for SoapArg {
    fn from(value: i64) -> Self {
        SoapArg::Int(value)
    }
}

impl From<u32> for SoapArg {
    fn from(value: u32) -> Self {
        SoapArg::Int(value.into())
    }
}

impl From<f64> for SoapArg {
    fn from(value: f64) -> Self {
        SoapArg::Float(value)
    }
}

impl From<NaiveDateTime> for SoapArg {
    fn from(value: NaiveDateTime) -> Self {
        SoapArg::DateTime(value)
    }
}

impl<T: Into<SoapArg>> From<Option<T>> for SoapArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(SoapArg::Null, Into::into)
    }
}

// ============================================================================
// Service Trait
// ============================================================================

/// Transport that executes a remote method and returns its raw XML result
#[async_trait]
pub trait SoapService: Send + Sync {
    /// Invoke `method` with positional `args`.
    ///
    /// Network or protocol failures are reported as [`Error::Transport`].
    async fn invoke(&self, method: &str, args: &[SoapArg]) -> Result<String>;
}

// ============================================================================
// Canned Service
// ============================================================================

/// A recorded call made against a [`CannedService`]
#[derive(Debug, Clone, PartialEq)]
pub struct SoapCall {
    /// Remote method name
    pub method: String,
    /// Arguments in call order
    pub args: Vec<SoapArg>,
}

/// In-memory service that replays queued responses per method.
///
/// Useful for exercising client code without a network. Every call is
/// recorded; a method with no queued response fails with a transport error.
#[derive(Debug, Default)]
pub struct CannedService {
    responses: Mutex<HashMap<String, VecDeque<String>>>,
    calls: Mutex<Vec<SoapCall>>,
}

impl CannedService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a method
    #[must_use]
    pub fn respond(self, method: impl Into<String>, xml: impl Into<String>) -> Self {
        self.push_response(method, xml);
        self
    }

    /// Queue a response for a method through a shared reference
    pub fn push_response(&self, method: impl Into<String>, xml: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entry(method.into())
            .or_default()
            .push_back(xml.into());
    }

    /// All calls made so far
    pub fn calls(&self) -> Vec<SoapCall> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The most recent call, if any
    pub fn last_call(&self) -> Option<SoapCall> {
        self.calls().pop()
    }
}

#[async_trait]
impl SoapService for CannedService {
    async fn invoke(&self, method: &str, args: &[SoapArg]) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(SoapCall {
                method: method.to_string(),
                args: args.to_vec(),
            });

        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| Error::transport(format!("no response queued for {method}")))
    }
}
