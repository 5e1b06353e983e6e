//! Classic City of Mist: the minimal variant and the registry's fallback.

use async_trait::async_trait;
use mist_rules::{FadeType, Theme};
use serde_json::Value;

use super::{HeaderTable, RuleSystem, SystemFamily, SystemName};
use crate::error::Result;
use crate::host::{Host, Localizer};
use crate::settings::keys;

pub const CITY_OF_MIST: &str = "city-of-mist";

const HEADER_TABLE: HeaderTable = HeaderTable {
    character: "systems/city-of-mist/templates/parts/character-sheet-header.html",
    threat: "",
    crew: "",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CityOfMistSystem;

impl CityOfMistSystem {
    pub fn new() -> Self {
        Self
    }
}

/// Localized wording for a default fade type.
pub(crate) fn fade_name(fade: FadeType, i18n: &dyn Localizer) -> String {
    match fade.localization_key() {
        Some(key) => i18n.localize(key),
        None => {
            let fade = FadeType::Fade.localization_key().unwrap_or_default();
            let crack = FadeType::Crack.localization_key().unwrap_or_default();
            format!("{} / {}", i18n.localize(fade), i18n.localize(crack))
        }
    }
}

#[async_trait]
impl RuleSystem for CityOfMistSystem {
    fn name(&self) -> SystemName {
        SystemName::from_static(CITY_OF_MIST)
    }

    fn label_key(&self) -> &'static str {
        "CityOfMist.settings.system.0"
    }

    fn starter_name(&self) -> &'static str {
        "CityOfMist"
    }

    fn family(&self) -> SystemFamily {
        SystemFamily::CityOfMist
    }

    fn theme_increase_name(&self, _theme: &Theme, i18n: &dyn Localizer) -> String {
        i18n.localize("CityOfMist.terms.attention")
    }

    fn theme_decrease_name(&self, theme: &Theme, i18n: &dyn Localizer) -> String {
        if let Some(fade_type) = theme.themebook.as_ref().and_then(|b| b.fade_type.as_ref()) {
            return fade_type.clone();
        }
        fade_name(theme.default_fade(), i18n)
    }

    fn downtime_template(&self) -> &'static str {
        "systems/city-of-mist/templates/dialogs/pc-downtime-chooser-com.hbs"
    }

    fn header_table(&self) -> &HeaderTable {
        &HEADER_TABLE
    }

    async fn on_change_to(&self, host: &Host) -> Result<()> {
        self.family().on_change_to(host).await?;
        let settings = &host.settings;
        settings.set(keys::BASE_SYSTEM, Value::from(CITY_OF_MIST)).await?;
        settings.set(keys::MOVES_INCLUDE, Value::from(CITY_OF_MIST)).await?;
        settings.set(keys::SYSTEM, Value::from(CITY_OF_MIST)).await?;
        Ok(())
    }
}
