//! Collaborators the host application supplies.
//!
//! Lifecycle hooks receive a [`Host`] by reference instead of reaching for
//! globals.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::settings::{SettingDescriptor, SettingsStore};

/// User-visible diagnostics.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Localization lookup.
pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLocalizer;

impl Localizer for KeyLocalizer {
    fn localize(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Map-backed localizer; unknown keys fall back to the key itself.
#[derive(Debug, Clone, Default)]
pub struct StaticLocalizer {
    strings: HashMap<String, String>,
}

impl StaticLocalizer {
    pub fn new(strings: HashMap<String, String>) -> Self {
        Self { strings }
    }

    /// Load a flat `{ "key": "text" }` JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.strings.insert(key.into(), text.into());
    }
}

impl Localizer for StaticLocalizer {
    fn localize(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// The host's configuration registration facility.
pub trait SettingsRegistrar: Send + Sync {
    fn register_setting(&self, key: &str, descriptor: &SettingDescriptor) -> Result<()>;
}

/// Produces markup from a template id. The output is opaque to this crate.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(&self, template: &str, data: Value) -> Result<String>;
}

/// Presentation layer that carries one active style tag at a time.
pub trait StyleSurface: Send + Sync {
    fn apply_styles(&self, add: &str, remove: &[String]);
}

/// Bundle of host collaborators handed to lifecycle hooks.
#[derive(Clone)]
pub struct Host {
    pub settings: Arc<dyn SettingsStore>,
    pub notifier: Arc<dyn Notifier>,
    pub localizer: Arc<dyn Localizer>,
    pub registrar: Arc<dyn SettingsRegistrar>,
    pub renderer: Arc<dyn TemplateRenderer>,
}
