//! Client configuration
//!
//! Credentials and settings for talking to Docmail, loadable from YAML:
//!
//! ```yaml
//! username: acme
//! password: s3cret
//! source: billing-run
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Default WSDL location of the Docmail API v2
pub const DOCMAIL_WSDL: &str = "https://www.cfhdocmail.com/BetaAPI2/DMWS.asmx?WSDL";

/// Response format requested from the service
pub const DEFAULT_RETURN_FORMAT: &str = "XML";

/// Configuration for a [`DocmailClient`](crate::client::DocmailClient)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Docmail account user name
    pub username: String,

    /// Docmail account password
    pub password: String,

    /// Free-text tag identifying the calling application
    #[serde(default)]
    pub source: String,

    /// WSDL of the service, for transports that need it
    #[serde(default = "default_wsdl_url")]
    pub wsdl_url: String,

    /// Format of successful responses
    #[serde(default = "default_return_format")]
    pub return_format: String,

    /// Format of error responses
    #[serde(default = "default_return_format")]
    pub failure_return_format: String,
}

fn default_wsdl_url() -> String {
    DOCMAIL_WSDL.to_string()
}

fn default_return_format() -> String {
    DEFAULT_RETURN_FORMAT.to_string()
}

impl ClientConfig {
    /// Create a config with the given credentials and defaults for the rest
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            source: String::new(),
            wsdl_url: default_wsdl_url(),
            return_format: default_return_format(),
            failure_return_format: default_return_format(),
        }
    }

    /// Create a new config builder
    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(username, password),
        }
    }

    /// Check that the config can be used
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::config("username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(Error::config("password cannot be empty"));
        }
        if self.wsdl_url.trim().is_empty() {
            return Err(Error::config("wsdl_url cannot be empty"));
        }
        if self.return_format.trim().is_empty() {
            return Err(Error::config("return_format cannot be empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("source", &self.source)
            .field("wsdl_url", &self.wsdl_url)
            .field("return_format", &self.return_format)
            .field("failure_return_format", &self.failure_return_format)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the source tag
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.config.source = source.into();
        self
    }

    /// Set the WSDL URL
    #[must_use]
    pub fn wsdl_url(mut self, url: impl Into<String>) -> Self {
        self.config.wsdl_url = url.into();
        self
    }

    /// Set the response format
    #[must_use]
    pub fn return_format(mut self, format: impl Into<String>) -> Self {
        self.config.return_format = format.into();
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Load a client config from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a client config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;

    config.validate()?;
    Ok(config)
}
