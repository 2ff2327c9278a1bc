use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Where to find the cluster and which index to search.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: Option<u16>,
    pub index: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionSettings {
    pub fn new(host: impl Into<String>, port: u16, index: impl Into<String>) -> Self {
        Self { host: host.into(), port: Some(port), index: index.into(), ..Self::default() }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Host, port and index are required; credentials are optional.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.host.trim().is_empty() {
            missing.push("host");
        }
        if self.port.is_none() {
            missing.push("port");
        }
        if self.index.trim().is_empty() {
            missing.push("index");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingConnectionFields(missing))
        }
    }

    /// `http://host:port`, once both are known.
    pub fn endpoint(&self) -> Option<String> {
        let host = self.host.trim();
        match self.port {
            Some(port) if !host.is_empty() => Some(format!("http://{host}:{port}")),
            _ => None,
        }
    }

    /// Basic auth is only used when both username and password are set.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }

    pub fn connected_label(&self) -> String {
        let port = self.port.map(|p| p.to_string()).unwrap_or_default();
        format!("Connected to {}:{}, Index: {}", self.host.trim(), port, self.index.trim())
    }
}

// Hand-written so the password never reaches logs.
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("index", &self.index)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
