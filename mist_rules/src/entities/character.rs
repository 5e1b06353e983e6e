//! Character definitions.

use serde::{Deserialize, Serialize};

use super::{CharacterKind, EntityId, Theme, ThemeSlot};
use crate::mechanics::{Essence, ThemeType};

/// A character and the themes it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub kind: CharacterKind,

    /// Themes in sheet order.
    #[serde(default)]
    pub themes: Vec<Theme>,

    /// Last stored essence, if any was ever set.
    pub essence: Option<Essence>,

    /// Users with write authority over this character.
    #[serde(default)]
    pub owners: Vec<EntityId>,
}

impl Character {
    /// Create a new player character with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            kind: CharacterKind::Character,
            themes: Vec::new(),
            essence: None,
            owners: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: CharacterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_owner(mut self, user: EntityId) -> Self {
        self.owners.push(user);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.themes.push(theme);
        self
    }

    /// Themes in the main slots; loadout and crew themes are excluded.
    pub fn main_themes(&self) -> Vec<&Theme> {
        self.themes
            .iter()
            .filter(|t| t.slot == ThemeSlot::Main)
            .collect()
    }

    /// Tags of the main themes, one per theme that has one.
    pub fn theme_types(&self) -> Vec<ThemeType> {
        self.main_themes()
            .into_iter()
            .filter_map(Theme::theme_type)
            .collect()
    }

    pub fn theme(&self, id: EntityId) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn theme_mut(&mut self, id: EntityId) -> Option<&mut Theme> {
        self.themes.iter_mut().find(|t| t.id == id)
    }

    /// Check whether `user` may write to this character.
    pub fn is_owned_by(&self, user: EntityId) -> bool {
        self.owners.contains(&user)
    }
}
