//! Error types for the wire protocol and configuration loading.
//!
//! None of these are fatal to the simulation: protocol errors are logged and
//! the offending message is skipped, config errors surface at process start.

use std::fmt;
use std::path::PathBuf;

/// A message from the presentation side could not be decoded.
#[derive(Debug)]
pub enum ProtocolError {
    /// The payload is not valid JSON.
    Json(serde_json::Error),
    /// The payload is valid JSON but not an object.
    NotAnObject,
    /// The object has no string `type` discriminator.
    MissingType,
    /// A known message type whose fields have the wrong shape.
    InvalidPayload {
        kind: String,
        reason: String,
    },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Json(e) => write!(f, "invalid JSON: {e}"),
            ProtocolError::NotAnObject => write!(f, "message is not a JSON object"),
            ProtocolError::MissingType => write!(f, "message has no string `type` field"),
            ProtocolError::InvalidPayload { kind, reason } => {
                write!(f, "malformed `{kind}` message: {reason}")
            }
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Json(e)
    }
}

/// The simulation config could not be loaded or is out of range.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Parse(e) => write!(f, "cannot parse config: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
