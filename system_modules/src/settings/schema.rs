//! Settings schema contributed by rule systems to the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::keys;

/// Who a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    /// Per user.
    Client,
    /// Shared by the whole game.
    World,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingType {
    Boolean,
    String,
    Number,
}

/// Descriptor for one setting, in the shape the host registers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Localization key of the label.
    pub label: String,
    /// Localization key of the hint.
    pub hint: String,
    pub scope: SettingScope,
    /// Shown in the configuration UI.
    pub config: bool,
    pub value_type: SettingType,
    pub default: Value,
    /// Only game masters may change it.
    pub restricted: bool,
}

/// Setting key to descriptor, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsSchema(BTreeMap<String, SettingDescriptor>);

impl SettingsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, descriptor: SettingDescriptor) -> Self {
        self.0.insert(key.into(), descriptor);
        self
    }

    /// Layer `other` on top of this schema. Entries in `other` win.
    pub fn merge(mut self, other: SettingsSchema) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn get(&self, key: &str) -> Option<&SettingDescriptor> {
        self.0.get(key)
    }

    pub fn default_for(&self, key: &str) -> Option<&Value> {
        self.get(key).map(|d| &d.default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingDescriptor)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Settings every system shares.
pub fn base_schema() -> SettingsSchema {
    SettingsSchema::new().with(
        keys::BASE_SYSTEM,
        SettingDescriptor {
            label: "CityOfMist.settings.system.name".into(),
            hint: "CityOfMist.settings.system.hint".into(),
            scope: SettingScope::World,
            config: true,
            value_type: SettingType::String,
            default: Value::from("city-of-mist"),
            restricted: true,
        },
    )
}

/// Base settings widened with the engine layer's options.
pub fn engine_schema() -> SettingsSchema {
    base_schema().with(
        keys::LOADOUT_THEME,
        SettingDescriptor {
            label: "CityOfMist.settings.loadoutTheme.name".into(),
            hint: "CityOfMist.settings.loadoutTheme.hint".into(),
            scope: SettingScope::World,
            config: true,
            value_type: SettingType::Boolean,
            default: Value::Bool(true),
            restricted: true,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_schema_widens_base() {
        let base = base_schema();
        let engine = engine_schema();
        assert_eq!(base.len(), 1);
        assert_eq!(engine.len(), 2);
        assert!(engine.get(keys::BASE_SYSTEM).is_some());
        assert_eq!(engine.default_for(keys::LOADOUT_THEME), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_merge_later_wins() {
        let mut replaced = base_schema().get(keys::BASE_SYSTEM).cloned().unwrap();
        replaced.default = Value::from("otherscape");
        let merged = base_schema().merge(SettingsSchema::new().with(keys::BASE_SYSTEM, replaced));
        assert_eq!(merged.default_for(keys::BASE_SYSTEM), Some(&Value::from("otherscape")));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_descriptor_serializes_scope_lowercase() {
        let json = serde_json::to_value(base_schema()).unwrap();
        assert_eq!(json["baseSystem"]["scope"], "world");
    }
}
