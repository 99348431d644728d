//! # Engine Errors
//!
//! Fallible operations in the engine are limited to loading and validating
//! configuration. Everything that happens inside the streaming pipeline either
//! degrades silently (missing geometry) or panics on a broken stage contract.

use std::fmt;

/// Errors surfaced while setting up an [`EngineState`](super::EngineState).
#[derive(Debug)]
pub enum EngineError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration file is not valid JSON for [`EngineConfig`](super::config::EngineConfig).
    Parse(serde_json::Error),
    /// The configuration parsed but describes an unusable world.
    InvalidConfig(String),
    /// A block name did not match any known block type.
    UnknownBlockType(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Io(error) => write!(f, "failed to read configuration: {}", error),
            EngineError::Parse(error) => write!(f, "failed to parse configuration: {}", error),
            EngineError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            EngineError::UnknownBlockType(name) => write!(f, "unknown block type `{}`", name),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(error) => Some(error),
            EngineError::Parse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::Io(error)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::Parse(error)
    }
}
