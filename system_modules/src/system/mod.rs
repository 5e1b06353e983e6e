//! Rule system variants.
//!
//! A variant is a bundle of terminology, templates, settings, and lifecycle
//! hooks. Shared behaviour lives in default methods of [`RuleSystem`] and in
//! the [`SystemFamily`] a variant belongs to; variants override only what
//! differs.

mod city_of_mist;
mod engine;
mod otherscape;

pub use city_of_mist::*;
pub use engine::*;
pub use otherscape::*;

use async_trait::async_trait;
use mist_rules::{Character, Move, Theme};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::borrow::Borrow;

use crate::error::{Result, SystemError};
use crate::host::{Host, Localizer, TemplateRenderer};
use crate::settings::{base_schema, engine_schema, keys, SettingsSchema};

/// Validated identifier of a rule system: non-empty, `[a-z0-9-]` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SystemName(String);

impl SystemName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if valid {
            Ok(Self(name))
        } else {
            Err(SystemError::InvalidSystemName(name))
        }
    }

    /// For names known valid at compile time.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(SystemName::new(name).is_ok(), "bad builtin name {name}");
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Presentation style tag for this system.
    pub fn style_tag(&self) -> String {
        format!("style-{}", self.0)
    }
}

impl TryFrom<String> for SystemName {
    type Error = SystemError;

    fn try_from(value: String) -> Result<Self> {
        SystemName::new(value)
    }
}

impl From<SystemName> for String {
    fn from(name: SystemName) -> Self {
        name.0
    }
}

impl Borrow<str> for SystemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SystemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared capability layer a variant builds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemFamily {
    /// Classic City of Mist rules.
    CityOfMist,
    /// The Mist Engine layer: roll-dialog hooks and a wider schema.
    MistEngine,
}

impl SystemFamily {
    fn root_name(&self) -> &'static str {
        match self {
            SystemFamily::CityOfMist => "city-of-mist",
            SystemFamily::MistEngine => "mist-engine",
        }
    }

    /// Base change hook: writes the keys every member of the family shares.
    /// Variants run this first, then write their own keys over it.
    pub async fn on_change_to(&self, host: &Host) -> Result<()> {
        let settings = &host.settings;
        settings
            .set(keys::MOVES_INCLUDE, Value::from(self.root_name()))
            .await?;
        settings.set(keys::SYSTEM, Value::from(self.root_name())).await?;
        settings
            .set(
                keys::LOADOUT_THEME,
                Value::Bool(*self == SystemFamily::MistEngine),
            )
            .await?;
        Ok(())
    }

    pub fn settings(&self) -> SettingsSchema {
        match self {
            SystemFamily::CityOfMist => base_schema(),
            SystemFamily::MistEngine => engine_schema(),
        }
    }
}

/// Sheet sections with their own header template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetSection {
    Character,
    Threat,
    Crew,
}

/// Header template per sheet section. Empty means none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderTable {
    pub character: &'static str,
    pub threat: &'static str,
    pub crew: &'static str,
}

impl HeaderTable {
    pub fn get(&self, section: SheetSection) -> &'static str {
        match section {
            SheetSection::Character => self.character,
            SheetSection::Threat => self.threat,
            SheetSection::Crew => self.crew,
        }
    }
}

/// The capability contract every rule system satisfies.
#[async_trait]
pub trait RuleSystem: Send + Sync {
    /// Unique registry key.
    fn name(&self) -> SystemName;

    /// Localization key of the selectable label.
    fn label_key(&self) -> &'static str;

    fn label(&self, i18n: &dyn Localizer) -> String {
        i18n.localize(self.label_key())
    }

    /// Localization prefix for starter content, e.g. `"CityOfMist"`.
    fn starter_name(&self) -> &'static str;

    fn family(&self) -> SystemFamily;

    /// Name of the mechanic that strengthens a theme.
    fn theme_increase_name(&self, theme: &Theme, i18n: &dyn Localizer) -> String;

    /// Name of the mechanic that weakens a theme.
    fn theme_decrease_name(&self, theme: &Theme, i18n: &dyn Localizer) -> String;

    /// Whether a move's outcome may create new tags. So many moves can create
    /// things that gating per move is not attempted.
    fn can_create_tags(&self, _move: &Move) -> bool {
        true
    }

    fn downtime_template(&self) -> &'static str;

    /// Markup for the downtime selection dialog.
    async fn downtime_chooser(
        &self,
        character: &Character,
        renderer: &dyn TemplateRenderer,
    ) -> Result<String> {
        let data = json!({ "actor": serde_json::to_value(character)? });
        renderer.render(self.downtime_template(), data).await
    }

    fn header_table(&self) -> &HeaderTable;

    fn template_for(&self, section: SheetSection) -> &'static str {
        self.header_table().get(section)
    }

    /// Runs when this system becomes the configured one. Overrides must call
    /// `self.family().on_change_to(host)` before writing their own keys.
    async fn on_change_to(&self, host: &Host) -> Result<()> {
        self.family().on_change_to(host).await
    }

    /// Registers this system's settings with the host.
    async fn activate(&self, host: &Host) -> Result<()> {
        for (key, descriptor) in self.system_settings().iter() {
            host.registrar.register_setting(key, descriptor)?;
        }
        Ok(())
    }

    fn system_settings(&self) -> SettingsSchema {
        self.family().settings()
    }

    /// Engine-layer hooks, for systems built on the Mist Engine.
    fn as_engine(&self) -> Option<&dyn MistEngine> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_name_validation() {
        assert!(SystemName::new("city-of-mist").is_ok());
        assert!(SystemName::new("otherscape2").is_ok());
        assert!(SystemName::new("").is_err());
        assert!(SystemName::new("City Of Mist").is_err());
        assert!(SystemName::new("legend_in_the_mist").is_err());
    }

    #[test]
    fn test_system_name_serde_validates() {
        let name: SystemName = serde_json::from_str("\"otherscape\"").unwrap();
        assert_eq!(name.as_str(), "otherscape");
        assert!(serde_json::from_str::<SystemName>("\"Bad Name\"").is_err());
    }

    #[test]
    fn test_style_tag() {
        let name = SystemName::new("otherscape").unwrap();
        assert_eq!(name.style_tag(), "style-otherscape");
    }

    #[test]
    fn test_family_settings() {
        assert_eq!(SystemFamily::CityOfMist.settings().len(), 1);
        assert!(SystemFamily::MistEngine
            .settings()
            .get(keys::LOADOUT_THEME)
            .is_some());
    }
}
