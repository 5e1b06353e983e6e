//! Otherscape: the extended variant built on the Mist Engine layer.
//!
//! Adds the Essence mechanic. A character's essence follows from the
//! categories of its main themes, and the roll dialog offers extra options
//! to some essences. See [`crate::events::EssenceHandler`] for the
//! theme-created effect.

use async_trait::async_trait;
use mist_rules::{classify_themes, Character, Essence, Move, Theme, ThemeType};
use serde_json::Value;

use super::{HeaderTable, MistEngine, RollDialogOption, RuleSystem, SystemFamily, SystemName};
use crate::error::Result;
use crate::host::{Host, Localizer};
use crate::settings::{keys, SettingDescriptor, SettingScope, SettingType, SettingsSchema};

pub const OTHERSCAPE: &str = "otherscape";

const HEADER_TABLE: HeaderTable = HeaderTable {
    character: "systems/city-of-mist/templates/otherscape/pc-sheet-header.hbs",
    threat: "",
    crew: "",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct OtherscapeSystem;

impl OtherscapeSystem {
    pub fn new() -> Self {
        Self
    }

    pub fn determine_essence_from_themes<'a, I>(themes: I) -> Essence
    where
        I: IntoIterator<Item = &'a Theme>,
    {
        classify_themes(themes)
    }
}

#[async_trait]
impl RuleSystem for OtherscapeSystem {
    fn name(&self) -> SystemName {
        SystemName::from_static(OTHERSCAPE)
    }

    fn label_key(&self) -> &'static str {
        "CityOfMist.settings.system.1"
    }

    fn starter_name(&self) -> &'static str {
        "Otherscape"
    }

    fn family(&self) -> SystemFamily {
        SystemFamily::MistEngine
    }

    fn theme_increase_name(&self, _theme: &Theme, i18n: &dyn Localizer) -> String {
        i18n.localize("Otherscape.terms.upgrade")
    }

    fn theme_decrease_name(&self, _theme: &Theme, i18n: &dyn Localizer) -> String {
        i18n.localize("Otherscape.terms.decay")
    }

    fn downtime_template(&self) -> &'static str {
        "systems/city-of-mist/templates/dialogs/pc-downtime-chooser-otherscape.hbs"
    }

    fn header_table(&self) -> &HeaderTable {
        &HEADER_TABLE
    }

    async fn on_change_to(&self, host: &Host) -> Result<()> {
        self.family().on_change_to(host).await?;
        let settings = &host.settings;
        settings.set(keys::BASE_SYSTEM, Value::from(OTHERSCAPE)).await?;
        settings.set(keys::SYSTEM, Value::from(OTHERSCAPE)).await?;
        settings.set(keys::MOVES_INCLUDE, Value::from(OTHERSCAPE)).await?;
        Ok(())
    }

    fn system_settings(&self) -> SettingsSchema {
        self.family().settings().with(
            keys::AUTO_ESSENCE,
            SettingDescriptor {
                label: "CityOfMist.settings.autoEssence.name".into(),
                hint: "CityOfMist.settings.autoEssence.hint".into(),
                scope: SettingScope::Client,
                config: true,
                value_type: SettingType::Boolean,
                default: Value::Bool(true),
                restricted: false,
            },
        )
    }

    fn as_engine(&self) -> Option<&dyn MistEngine> {
        Some(self)
    }
}

impl MistEngine for OtherscapeSystem {
    fn roll_dialog_options(&self, character: &Character, mv: &Move) -> Vec<RollDialogOption> {
        if mv.is_stop_holding_back() {
            return Vec::new();
        }
        let additions: &[ThemeType] = match character.essence {
            Some(Essence::Spiritualist) => &[ThemeType::Self_, ThemeType::Mythos],
            Some(Essence::Cyborg) => &[ThemeType::Noise, ThemeType::Self_],
            _ => &[],
        };
        additions
            .iter()
            .copied()
            .map(RollDialogOption::add)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticLocalizer;
    use crate::system::{RollOptions, SheetSection};
    use crate::testing::EchoRenderer;
    use mist_rules::MoveCategory;

    #[test]
    fn test_identity_and_terms() {
        let system = OtherscapeSystem::new();
        let mut i18n = StaticLocalizer::default();
        i18n.insert("Otherscape.terms.upgrade", "Upgrade");
        i18n.insert("Otherscape.terms.decay", "Decay");
        let theme = Theme::of_type("Hacker", ThemeType::Noise);

        assert_eq!(system.name().as_str(), "otherscape");
        assert_eq!(system.starter_name(), "Otherscape");
        assert_eq!(system.theme_increase_name(&theme, &i18n), "Upgrade");
        assert_eq!(system.theme_decrease_name(&theme, &i18n), "Decay");
        assert_eq!(
            system.template_for(SheetSection::Character),
            "systems/city-of-mist/templates/otherscape/pc-sheet-header.hbs"
        );
    }

    #[tokio::test]
    async fn test_downtime_chooser_renders_own_template() {
        let system = OtherscapeSystem::new();
        let character = Character::new("Vex");

        let markup = system
            .downtime_chooser(&character, &EchoRenderer)
            .await
            .unwrap();

        let (template, data) = markup.split_once('|').unwrap();
        assert_eq!(
            template,
            "systems/city-of-mist/templates/dialogs/pc-downtime-chooser-otherscape.hbs"
        );
        let data: Value = serde_json::from_str(data).unwrap();
        assert_eq!(data["actor"]["name"], "Vex");
    }

    #[test]
    fn test_settings_extend_engine_schema() {
        let schema = OtherscapeSystem::new().system_settings();
        assert!(schema.get(keys::BASE_SYSTEM).is_some());
        assert!(schema.get(keys::LOADOUT_THEME).is_some());

        let auto = schema.get(keys::AUTO_ESSENCE).unwrap();
        assert_eq!(auto.scope, SettingScope::Client);
        assert!(auto.config);
        assert_eq!(auto.value_type, SettingType::Boolean);
        assert_eq!(auto.default, Value::Bool(true));
        assert!(!auto.restricted);
    }

    #[test]
    fn test_roll_dialog_options_by_essence() {
        let system = OtherscapeSystem::new();
        let engine = system.as_engine().unwrap();
        let face_danger = Move::new("Face Danger", MoveCategory::Core);

        let mut character = Character::new("Vex");
        character.essence = Some(Essence::Spiritualist);
        let types: Vec<_> = engine
            .roll_dialog_options(&character, &face_danger)
            .into_iter()
            .map(|o| o.theme_type)
            .collect();
        assert_eq!(types, vec![ThemeType::Self_, ThemeType::Mythos]);

        character.essence = Some(Essence::Cyborg);
        let types: Vec<_> = engine
            .roll_dialog_options(&character, &face_danger)
            .into_iter()
            .map(|o| o.theme_type)
            .collect();
        assert_eq!(types, vec![ThemeType::Noise, ThemeType::Self_]);

        character.essence = Some(Essence::Nexus);
        assert!(engine.roll_dialog_options(&character, &face_danger).is_empty());
    }

    #[test]
    fn test_stop_holding_back_gets_no_options() {
        let system = OtherscapeSystem::new();
        let mut character = Character::new("Vex");
        character.essence = Some(Essence::Cyborg);
        let shb = Move::new("Stop Holding Back", MoveCategory::Shb);
        assert!(system.roll_dialog_options(&character, &shb).is_empty());
    }

    #[test]
    fn test_update_roll_options_dedups() {
        let system = OtherscapeSystem::new();
        let mut options = RollOptions::default();
        system.update_roll_options(&mut options, &[ThemeType::Self_, ThemeType::Mythos]);
        system.update_roll_options(&mut options, &[ThemeType::Self_]);
        assert_eq!(
            options.added_theme_types,
            vec![ThemeType::Self_, ThemeType::Mythos]
        );
    }

    #[test]
    fn test_determine_essence_from_themes() {
        let themes = vec![
            Theme::of_type("Cop", ThemeType::Self_),
            Theme::of_type("Oracle", ThemeType::Mythos),
            Theme::of_type("Hacker", ThemeType::Noise),
        ];
        assert_eq!(
            OtherscapeSystem::determine_essence_from_themes(&themes),
            Essence::Nexus
        );
    }
}
