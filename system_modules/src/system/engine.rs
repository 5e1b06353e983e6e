//! The Mist Engine layer: roll-dialog augmentation on top of [`RuleSystem`].

use mist_rules::{Character, Move, ThemeType};
use serde::{Deserialize, Serialize};

use super::RuleSystem;

/// A checkbox offered in the roll dialog that adds a theme category to the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollDialogOption {
    pub theme_type: ThemeType,
    pub label_key: &'static str,
}

impl RollDialogOption {
    pub fn add(theme_type: ThemeType) -> Self {
        let label_key = match theme_type {
            ThemeType::Self_ => "Otherscape.dialog.addSelf",
            ThemeType::Mythos => "Otherscape.dialog.addMythos",
            ThemeType::Noise => "Otherscape.dialog.addNoise",
        };
        Self {
            theme_type,
            label_key,
        }
    }
}

/// Options collected from the roll dialog before the roll is made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOptions {
    /// Extra categories the roller chose to count, without repeats.
    #[serde(default)]
    pub added_theme_types: Vec<ThemeType>,
}

pub trait MistEngine: RuleSystem {
    /// Extra dialog options for `character` rolling `mv`.
    fn roll_dialog_options(&self, _character: &Character, _mv: &Move) -> Vec<RollDialogOption> {
        Vec::new()
    }

    /// Fold the checked dialog options into `options`.
    fn update_roll_options(&self, options: &mut RollOptions, selections: &[ThemeType]) {
        for theme_type in selections {
            if !options.added_theme_types.contains(theme_type) {
                options.added_theme_types.push(*theme_type);
            }
        }
    }
}
