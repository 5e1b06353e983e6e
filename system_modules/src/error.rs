//! Error types for rule-system management.

use thiserror::Error;

use crate::system::SystemName;
use mist_rules::EntityId;

/// Errors raised by registries, lifecycle hooks, and their collaborators.
#[derive(Debug, Error)]
pub enum SystemError {
    /// A system name failed validation.
    #[error("invalid system name: {0:?}")]
    InvalidSystemName(String),

    /// The configured system is not registered.
    #[error("no rules system registered as {0:?}")]
    UnknownSystem(String),

    /// The settings store rejected a read or write.
    #[error("setting {key}: {message}")]
    Settings { key: String, message: String },

    /// A lifecycle hook failed.
    #[error("{system}: {hook} failed: {message}")]
    Hook {
        system: SystemName,
        hook: &'static str,
        message: String,
    },

    /// A startup registration handler failed.
    #[error("registration failed: {message}")]
    Registration { message: String },

    #[error("character not found: {0}")]
    CharacterNotFound(EntityId),

    #[error("theme {theme} not found on character {character}")]
    ThemeNotFound { character: EntityId, theme: EntityId },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl SystemError {
    pub fn settings(key: impl Into<String>, message: impl Into<String>) -> Self {
        SystemError::Settings {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SystemError>;
